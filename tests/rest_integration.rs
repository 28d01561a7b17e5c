mod common;

use rust_decimal::Decimal;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kraken_spot_rest::error::KrakenError;
use kraken_spot_rest::spot::rest::private::{
    AddExportRequest, AddOrderRequest, CancelAllOrdersAfterRequest, CancelOrderRequest, ClosedOrdersRequest,
    DepositMethodsRequest, EarnAllocateRequest, EarnStatusRequest, EarnStrategiesRequest, ExportState,
    ExportStatusRequest, LockType, PageCursor, RemoveExportRequest, RemoveKind, ReportKind, TransferStatusRequest,
    WalletTransferRequest, WithdrawCancelRequest, WithdrawRequest,
};
use kraken_spot_rest::types::{BuySell, OrderStatus, OrderType, TimeInForce};

use common::signing_client;

#[tokio::test]
async fn test_get_closed_orders() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "closed": {
                "O37652-RJWRT-IMO74O": {
                    "refid": null,
                    "userref": 1,
                    "status": "canceled",
                    "reason": "User requested",
                    "opentm": 1688148493.7708,
                    "closetm": 1688148610.0482,
                    "starttm": 0,
                    "expiretm": 0,
                    "descr": {
                        "pair": "XBTGBP",
                        "type": "buy",
                        "ordertype": "stop-loss-limit",
                        "price": "23667.0",
                        "price2": "0",
                        "leverage": "none",
                        "order": "buy 0.00100000 XBTGBP @ limit 23667.0",
                        "close": ""
                    },
                    "vol": "0.00100000",
                    "vol_exec": "0.00000000",
                    "cost": "0.00000",
                    "fee": "0.00000",
                    "price": "0.00000",
                    "stopprice": "0.00000",
                    "limitprice": "0.00000",
                    "misc": "",
                    "oflags": "fciq",
                    "trigger": "index",
                    "trades": []
                }
            },
            "count": 1
        }
    });

    Mock::given(method("POST"))
        .and(path("/0/private/ClosedOrders"))
        .and(body_string_contains("trades=true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = signing_client(&server);
    let request = ClosedOrdersRequest {
        trades: Some(true),
        ..Default::default()
    };
    let closed = client
        .get_closed_orders(Some(&request))
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(closed.count, 1);
    let order = &closed.closed["O37652-RJWRT-IMO74O"];
    assert_eq!(order.status, OrderStatus::Canceled);
    assert_eq!(order.descr.ordertype, OrderType::StopLossLimit);
    assert_eq!(order.vol.as_str(), "0.00100000");
    assert_eq!(order.trigger.as_deref(), Some("index"));
    assert!(!order.is_filled());
}

#[tokio::test]
async fn test_get_trade_balance() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "eb": "1101.3425",
            "tb": "392.2264",
            "m": "7.0354",
            "n": "-10.0232",
            "c": "21.1063",
            "v": "31.1297",
            "e": "382.2032",
            "mf": "375.1678",
            "ml": "5432.57",
            "uv": "0.0000"
        }
    });

    Mock::given(method("POST"))
        .and(path("/0/private/TradeBalance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let balance = signing_client(&server)
        .get_trade_balance(None)
        .await
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(balance.unrealized_pnl.unwrap().as_str(), "-10.0232");
    assert_eq!(balance.margin_level.unwrap().to_decimal().unwrap(), Decimal::new(543257, 2));
}

#[tokio::test]
async fn test_add_order_validate_only() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "descr": { "order": "buy 1.25000000 XBTUSD @ limit 27500.0" }
        }
    });

    Mock::given(method("POST"))
        .and(path("/0/private/AddOrder"))
        .and(body_string_contains("pair=XBTUSD&type=buy&ordertype=limit&volume=1.25&price=27500"))
        .and(body_string_contains("timeinforce=IOC"))
        .and(body_string_contains("validate=true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let request = AddOrderRequest::new("XBTUSD", BuySell::Buy, OrderType::Limit, Decimal::new(125, 2))
        .price("27500")
        .time_in_force(TimeInForce::ImmediateOrCancel)
        .validate(true);
    let placed = signing_client(&server)
        .add_order(&request)
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert!(placed.txid.is_empty());
    assert_eq!(placed.descr.order, "buy 1.25000000 XBTUSD @ limit 27500.0");
}

#[tokio::test]
async fn test_add_order_rejected_by_kraken() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/0/private/AddOrder"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": ["EOrder:Insufficient funds"]
        })))
        .mount(&server)
        .await;

    let request = AddOrderRequest::new("XBTUSD", BuySell::Sell, OrderType::Market, "100");
    let response = signing_client(&server).add_order(&request).await.unwrap();

    match response.into_result().unwrap_err() {
        KrakenError::Api(api) => {
            assert_eq!(api.code, "EOrder");
            assert_eq!(api.message, "Insufficient funds");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_cancel_order_and_dead_mans_switch() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/CancelOrder"))
        .and(body_string_contains("cl_ord_id=my-order-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": [],
            "result": { "count": 1 }
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/0/private/CancelAllOrdersAfter"))
        .and(body_string_contains("timeout=60"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": [],
            "result": {
                "currentTime": "2023-03-24T17:41:56Z",
                "triggerTime": "2023-03-24T17:42:56Z"
            }
        })))
        .mount(&server)
        .await;

    let client = signing_client(&server);
    let cancelled = client
        .cancel_order(&CancelOrderRequest::by_client_id("my-order-1"))
        .await
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(cancelled.count, 1);

    let switch = client
        .cancel_all_orders_after(&CancelAllOrdersAfterRequest::new(60))
        .await
        .unwrap()
        .into_result()
        .unwrap();
    assert!(switch.is_armed());
    assert_eq!((switch.trigger_time - switch.current_time).whole_seconds(), 60);
}

#[tokio::test]
async fn test_get_deposit_methods() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": [{
            "method": "Bitcoin",
            "limit": false,
            "fee": "0.0000000000",
            "gen-address": true,
            "minimum": "0.00010000"
        }]
    });

    Mock::given(method("POST"))
        .and(path("/0/private/DepositMethods"))
        .and(body_string_contains("asset=XBT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let methods = signing_client(&server)
        .get_deposit_methods(&DepositMethodsRequest::new("XBT"))
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].method, "Bitcoin");
    assert!(methods[0].limit.is_none());
    assert_eq!(methods[0].gen_address, Some(true));
}

#[tokio::test]
async fn test_get_withdraw_info() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "method": "Tether USD",
            "limit": "10.00000000",
            "fee": "1.00000000",
            "amount": "9.00000000"
        }
    });

    Mock::given(method("POST"))
        .and(path("/0/private/WithdrawInfo"))
        .and(body_string_contains("asset=USDT&key=main&amount=10.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let request = WithdrawRequest::new("USDT", "main", "10.0");
    let info = signing_client(&server)
        .get_withdraw_info(&request)
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(info.method, "Tether USD");
    assert_eq!(info.limit.unwrap().as_str(), "10.00000000");
    assert_eq!(info.amount.as_str(), "9.00000000");
}

#[tokio::test]
async fn test_get_deposit_status_list() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": [{
            "method": "Bitcoin",
            "aclass": "currency",
            "asset": "XXBT",
            "refid": "FTQcuak-V6Za8qrWnhzTx67yYHz8Tg",
            "txid": "6544b41b607d8b2512baf801755a3a87b6890eacdb451be8a94059fb11f0a8d9",
            "info": "2Myd4eaAW96ojk38A2uDK4FbioCayvkEgVq",
            "amount": "0.78125000",
            "fee": "0.0000000000",
            "time": 1688992722,
            "status": "Success",
            "status-prop": "return",
            "orginators": ["2Myd4eaAW96ojk38A2uDK4FbioCayvkEgVq"]
        }]
    });

    Mock::given(method("POST"))
        .and(path("/0/private/DepositStatus"))
        .and(body_string_contains("asset=XBT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let request = TransferStatusRequest::for_asset("XBT");
    let status = signing_client(&server)
        .get_deposit_status(Some(&request))
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(status.entries().len(), 1);
    assert_eq!(status.entries()[0].time, 1688992722);
    assert_eq!(status.entries()[0].originators.as_ref().map(Vec::len), Some(1));
    assert!(status.next_cursor().is_none());
}

#[tokio::test]
async fn test_get_withdraw_status_cursor() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "withdrawals": [{
                "method": "Bitcoin",
                "aclass": "currency",
                "asset": "XXBT",
                "refid": "FTQcuak-V6Za8qrWnhzTx67yYHz8Tg",
                "txid": "THVRQM-33VKH-UCI7BS",
                "info": "mzp6yUVMRxfasyfwzTZjjy38dHqMX7Z3GR",
                "amount": "0.72485000",
                "fee": "0.00020000",
                "time": 1688014586,
                "status": "Pending"
            }],
            "next_cursor": "MTY4ODk5"
        }
    });

    Mock::given(method("POST"))
        .and(path("/0/private/WithdrawStatus"))
        .and(body_string_contains("cursor=true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let request = TransferStatusRequest::default().paginated();
    let status = signing_client(&server)
        .get_withdraw_status(Some(&request))
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(status.entries().len(), 1);
    assert_eq!(status.entries()[0].amount.as_str(), "0.72485000");
    assert_eq!(status.next_cursor(), Some("MTY4ODk5"));

    let next = TransferStatusRequest {
        cursor: Some(PageCursor::Next("MTY4ODk5".into())),
        ..TransferStatusRequest::default()
    };
    assert_eq!(serde_urlencoded::to_string(&next).unwrap(), "cursor=MTY4ODk5");
}

#[tokio::test]
async fn test_withdraw_cancel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/0/private/WithdrawCancel"))
        .and(body_string_contains("asset=XBT"))
        .and(body_string_contains("refid=FTQcuak-V6Za8qrWnhzTx67yYHz8Tg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": [],
            "result": true
        })))
        .mount(&server)
        .await;

    let request = WithdrawCancelRequest::new("XBT", "FTQcuak-V6Za8qrWnhzTx67yYHz8Tg");
    let cancelled = signing_client(&server)
        .withdraw_cancel(&request)
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert!(cancelled);
}

#[tokio::test]
async fn test_wallet_transfer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/0/private/WalletTransfer"))
        .and(body_string_contains("asset=USDT&from=Spot+Wallet&to=Futures+Wallet&amount=10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": [],
            "result": { "refid": "BOG5AE5-KSCNR4-VPNPEV" }
        })))
        .mount(&server)
        .await;

    let request = WalletTransferRequest::spot_to_futures("USDT", Decimal::new(10, 0));
    let confirmation = signing_client(&server)
        .wallet_transfer(&request)
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(confirmation.refid, "BOG5AE5-KSCNR4-VPNPEV");
}

#[tokio::test]
async fn test_list_earn_strategies() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "items": [{
                "allocation_fee": "0.0000",
                "allocation_restriction_info": [],
                "apr_estimate": { "low": "8.0000", "high": "12.0000" },
                "asset": "DOT",
                "auto_compound": { "type": "enabled" },
                "can_allocate": true,
                "can_deallocate": true,
                "deallocation_fee": 0,
                "id": "ESRFUO3-Q62XD-WIOIL7",
                "lock_type": {
                    "type": "bonded",
                    "payout_frequency": 604800,
                    "bonding_period": 0,
                    "unbonding_period": 2419200,
                    "unbonding_rewards": false
                },
                "user_min_allocation": "0.01",
                "yield_source": { "type": "staking" }
            }],
            "next_cursor": null
        }
    });

    Mock::given(method("POST"))
        .and(path("/0/private/Earn/Strategies"))
        .and(body_string_contains("lock_type=bonded"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let request = EarnStrategiesRequest {
        lock_type: Some(LockType::Bonded),
        ..Default::default()
    };
    let strategies = signing_client(&server)
        .list_earn_strategies(Some(&request))
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(strategies.items.len(), 1);
    let strategy = &strategies.items[0];
    assert_eq!(strategy.asset, "DOT");
    assert_eq!(strategy.lock_type.kind, LockType::Bonded);
    assert_eq!(strategy.lock_type.unbonding_period, Some(2419200));
    assert_eq!(strategy.deallocation_fee.to_decimal().unwrap(), Decimal::ZERO);
    assert!(strategies.next_cursor.is_none());
}

#[tokio::test]
async fn test_earn_allocate_and_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/Earn/Allocate"))
        .and(body_string_contains("amount=1&strategy_id=ESRFUO3-Q62XD-WIOIL7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": [],
            "result": true
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/0/private/Earn/AllocateStatus"))
        .and(body_string_contains("strategy_id=ESRFUO3-Q62XD-WIOIL7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": [],
            "result": { "pending": true }
        })))
        .mount(&server)
        .await;

    let client = signing_client(&server);
    let accepted = client
        .earn_allocate(&EarnAllocateRequest::new(Decimal::ONE, "ESRFUO3-Q62XD-WIOIL7"))
        .await
        .unwrap()
        .into_result()
        .unwrap();
    assert!(accepted);

    let status = client
        .get_earn_allocation_status(&EarnStatusRequest::new("ESRFUO3-Q62XD-WIOIL7"))
        .await
        .unwrap()
        .into_result()
        .unwrap();
    assert!(status.pending);
}

#[tokio::test]
async fn test_export_lifecycle() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/AddExport"))
        .and(body_string_contains("report=trades&format=CSV&description=q3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": [],
            "result": { "id": "TCJA" }
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/0/private/ExportStatus"))
        .and(body_string_contains("report=trades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": [],
            "result": [{
                "id": "TCJA",
                "descr": "q3",
                "format": "CSV",
                "report": "trades",
                "subtype": "all",
                "status": "Queued",
                "flags": "0",
                "fields": "all",
                "createdtm": "1688669085",
                "expiretm": "1688878685",
                "starttm": "1688669093",
                "completedtm": "1688669093",
                "datastarttm": "1683556800",
                "dataendtm": "1688669085",
                "aclass": "forex",
                "asset": "all"
            }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/0/private/RemoveExport"))
        .and(body_string_contains("id=TCJA&type=cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": [],
            "result": { "cancel": true }
        })))
        .mount(&server)
        .await;

    let client = signing_client(&server);
    let added = client
        .add_export(&AddExportRequest::new(ReportKind::Trades, "q3"))
        .await
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(added.id, "TCJA");

    let reports = client
        .get_export_status(&ExportStatusRequest { report: ReportKind::Trades })
        .await
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(reports[0].status, ExportState::Queued);
    assert!(!reports[0].is_ready());

    let removed = client
        .remove_export(&RemoveExportRequest {
            id: added.id,
            kind: RemoveKind::Cancel,
        })
        .await
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(removed.cancel, Some(true));
    assert_eq!(removed.delete, None);
}
