//! Example: Requesting a ledger export and saving the archive.
//!
//! Run with: cargo run --example export_download

use std::sync::Arc;
use std::time::Duration;

use kraken_spot_rest::auth::EnvCredentials;
use kraken_spot_rest::spot::rest::SpotRestClient;
use kraken_spot_rest::spot::rest::private::{
    AddExportRequest, ExportStatusRequest, RemoveExportRequest, RemoveKind, ReportKind, RetrieveExportRequest,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let credentials = match EnvCredentials::try_from_env() {
        Some(creds) => Arc::new(creds),
        None => {
            println!("Set KRAKEN_API_KEY and KRAKEN_API_SECRET to run this example.");
            return Ok(());
        }
    };

    let client = SpotRestClient::builder()
        .credentials(credentials)
        .user_agent("kraken-spot-rest-demos/export_download")
        .build();

    let export = client
        .add_export(&AddExportRequest::new(ReportKind::Ledgers, "demo export"))
        .await?
        .into_result()?;
    println!("Queued export {}", export.id);

    let status_request = ExportStatusRequest {
        report: ReportKind::Ledgers,
    };
    loop {
        let reports = client.get_export_status(&status_request).await?.into_result()?;
        match reports.iter().find(|report| report.id == export.id) {
            Some(report) if report.is_ready() => break,
            Some(report) => println!("Export is {:?}, waiting", report.status),
            None => println!("Export not listed yet, waiting"),
        }
        tokio::time::sleep(Duration::from_secs(5)).await;
    }

    let download = client
        .retrieve_export(&RetrieveExportRequest { id: export.id.clone() })
        .await?
        .into_download()?;
    println!("Downloading {} ({:?} bytes)", download.media(), download.content_length());

    let path = format!("{}.zip", export.id);
    let mut file = tokio::fs::File::create(&path).await?;
    let written = download.write_to(&mut file).await?;
    println!("Wrote {written} bytes to {path}");

    let removed = client
        .remove_export(&RemoveExportRequest {
            id: export.id,
            kind: RemoveKind::Delete,
        })
        .await?
        .into_result()?;
    println!("Deleted on server: {:?}", removed.delete);
    Ok(())
}
