use std::sync::Arc;
use std::time::Duration;

use brisk_store::app_system::{setup_tracing, SiteConfig, SiteSystem};
use brisk_store::donation_workflow::{SimulatedGateway, WorkflowState};
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = SiteConfig::from_env()?;
    info!(?config, "Starting Brisk site store");

    let system = SiteSystem::new(config);

    let services = system.services.get_featured(3).await?;
    info!(count = services.len(), "Featured services loaded");

    let subscriber = system.subscribers.add("farmer@example.com", None).await?;
    info!(subscriber_id = %subscriber.meta.id, "Subscriber added");

    let gateway = Arc::new(SimulatedGateway::new("successful", Duration::from_millis(50)));
    let mut workflow = system
        .donation_workflow(gateway)
        .with_campaign_hint("biogas-for-schools");

    let span = tracing::info_span!("donation");
    async {
        workflow.load_campaigns().await?;

        let form = workflow.form_mut();
        form.amount = "50000".to_string();
        form.donor_name = "Demo Donor".to_string();
        form.donor_email = "demo@example.com".to_string();
        form.payment_method = "mtn_momo".to_string();

        workflow.advance();
        match workflow.confirm().await {
            WorkflowState::Success(result) => {
                info!(donation_id = %result.donation.meta.id, "Donation recorded");
            }
            other => warn!(state = ?other.step(), message = ?other.error_message(), "Donation did not complete"),
        }
        if let Some(receipt) = workflow.receipt() {
            info!(file = %receipt.file_name(), "Receipt ready\n{}", receipt.text());
        }
        Ok::<_, brisk_store::error::StoreError>(())
    }
    .instrument(span)
    .await?;

    let summary = system.donation_report().dashboard_summary(chrono::Utc::now()).await?;
    info!(
        month_total = summary.month_total,
        donors = summary.donors_count,
        top = ?summary.top_campaign.map(|c| c.name),
        "Dashboard summary"
    );

    let stats = system.storage_stats();
    info!(
        read_fallbacks = stats.read_fallbacks(),
        write_failures = stats.write_failures(),
        skipped_records = stats.skipped_records(),
        "Storage stats"
    );

    drop(workflow);
    if let Err(e) = system.shutdown().await {
        error!(error = %e, "Shutdown failed");
        return Err(e.into());
    }

    info!("Application completed successfully");
    Ok(())
}
