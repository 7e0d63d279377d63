use std::sync::Arc;

use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

use super::config::SiteConfig;
use crate::actor_framework::{CollectionActor, CollectionClient, Entity};
use crate::clients::{
    CampaignClient, DonationClient, InquiryClient, ProjectClient, ServiceClient, SubscriberClient,
    TestimonialClient, UserClient,
};
use crate::domain::{Campaign, Donation, Inquiry, Project, Service, Subscriber, Testimonial, User};
use crate::donation_workflow::{DonationWorkflow, PaymentGateway};
use crate::reporting::DonationReport;
use crate::seed;
use crate::storage::{FilePersistence, KeyedStore, MemoryPersistence, Persistence, StorageStats};

/// Starts one collection actor per entity and hands out their clients.
///
/// Actors stop once every clone of their client is dropped, including the
/// ones held by workflows and reports built from this system.
pub struct SiteSystem {
    pub services: ServiceClient,
    pub projects: ProjectClient,
    pub testimonials: TestimonialClient,
    pub inquiries: InquiryClient,
    pub subscribers: SubscriberClient,
    pub users: UserClient,
    pub campaigns: CampaignClient,
    pub donations: DonationClient,
    config: SiteConfig,
    stats: Arc<StorageStats>,
    handles: Vec<JoinHandle<()>>,
}

struct Spawner<'a> {
    config: &'a SiteConfig,
    backend: Arc<dyn Persistence>,
    stats: Arc<StorageStats>,
    handles: Vec<JoinHandle<()>>,
}

impl Spawner<'_> {
    fn spawn<T: Entity>(&mut self, seed: Vec<T>) -> CollectionClient<T> {
        let storage = KeyedStore::new(
            self.backend.clone(),
            self.config.storage_key(T::STORAGE_KEY),
            self.stats.clone(),
        );
        let (actor, client) = CollectionActor::with_generated_ids(self.config.channel_capacity, storage, seed);
        self.handles.push(tokio::spawn(actor.run()));
        client
    }
}

impl SiteSystem {
    /// Start with the backend named by `config`: files under `storage_dir`,
    /// memory otherwise.
    pub fn new(config: SiteConfig) -> Self {
        let backend: Arc<dyn Persistence> = match &config.storage_dir {
            Some(dir) => {
                info!(dir = %dir.display(), "Using file storage");
                Arc::new(FilePersistence::new(dir.clone()))
            }
            None => {
                info!("Using in-memory storage");
                Arc::new(MemoryPersistence::new())
            }
        };
        Self::with_backend(config, backend)
    }

    pub fn with_backend(config: SiteConfig, backend: Arc<dyn Persistence>) -> Self {
        let stats = StorageStats::new();
        let mut spawner = Spawner {
            config: &config,
            backend,
            stats: stats.clone(),
            handles: Vec::new(),
        };

        let services = ServiceClient::new(spawner.spawn::<Service>(seed::services()));
        let projects = ProjectClient::new(spawner.spawn::<Project>(seed::projects()));
        let testimonials = TestimonialClient::new(spawner.spawn::<Testimonial>(Vec::new()));
        let inquiries = InquiryClient::new(spawner.spawn::<Inquiry>(Vec::new()));
        let subscribers = SubscriberClient::new(spawner.spawn::<Subscriber>(Vec::new()));
        let users = UserClient::new(spawner.spawn::<User>(Vec::new()));
        let campaigns = CampaignClient::new(spawner.spawn::<Campaign>(seed::campaigns()));
        let donations = DonationClient::new(spawner.spawn::<Donation>(Vec::new()));

        let handles = spawner.handles;
        info!(actors = handles.len(), "Site system started");

        Self {
            services,
            projects,
            testimonials,
            inquiries,
            subscribers,
            users,
            campaigns,
            donations,
            config,
            stats,
            handles,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Fallback and write-failure counters shared by every collection.
    pub fn storage_stats(&self) -> &Arc<StorageStats> {
        &self.stats
    }

    pub fn donation_workflow(&self, gateway: Arc<dyn PaymentGateway>) -> DonationWorkflow {
        DonationWorkflow::new(
            self.campaigns.clone(),
            self.donations.clone(),
            gateway,
            self.config.payment_timeout,
        )
    }

    pub fn donation_report(&self) -> DonationReport {
        DonationReport::new(self.campaigns.clone(), self.donations.clone())
    }

    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down site system...");

        let SiteSystem {
            services,
            projects,
            testimonials,
            inquiries,
            subscribers,
            users,
            campaigns,
            donations,
            handles,
            ..
        } = self;
        drop((services, projects, testimonials, inquiries, subscribers, users, campaigns, donations));

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(e);
            }
        }

        info!("Site system shutdown complete.");
        Ok(())
    }
}
