//! # Mock Framework
//!
//! Test doubles for clients, the payment gateway and storage.
//!
//! Use [`create_mock_client`] to get a client and the receiving end of its
//! channel, then the `expect_*` helpers to assert on and answer each request.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, oneshot};

use crate::actor_framework::{CollectionActor, CollectionClient, CollectionRequest, Entity, NewRecord, Response};
use crate::donation_workflow::{CheckoutRequest, PaymentGateway, PaymentOutcome};
use crate::error::StorageError;
use crate::storage::{KeyedStore, MemoryPersistence, Persistence, StorageStats};

/// A client whose requests land on a receiver the test controls instead of
/// a running actor.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (CollectionClient<T>, mpsc::Receiver<CollectionRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CollectionClient::new(sender), receiver)
}

/// A real actor over a fresh in-memory store.
pub fn spawn_collection<T: Entity>(seed: Vec<T>) -> CollectionClient<T> {
    let storage = KeyedStore::new(Arc::new(MemoryPersistence::new()), T::STORAGE_KEY, StorageStats::new());
    let (actor, client) = CollectionActor::with_generated_ids(16, storage, seed);
    tokio::spawn(actor.run());
    client
}

pub async fn expect_list<T: Entity>(receiver: &mut mpsc::Receiver<CollectionRequest<T>>) -> Option<Response<Vec<T>>> {
    match receiver.recv().await {
        Some(CollectionRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(String, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(NewRecord<T::Create>, Response<T>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Create { record, respond_to }) => Some((record, respond_to)),
        _ => None,
    }
}

pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(String, T::Action, Response<Option<T::ActionResult>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// How a [`ScriptedGateway`] answers the next checkout.
#[derive(Debug, Clone)]
pub enum GatewayScript {
    Answer(PaymentOutcome),
    /// Keep the channel open and never answer.
    Hang,
    /// Drop the sender without answering.
    Drop,
}

/// Payment gateway that replays scripted answers in order and records every
/// checkout request it receives.
#[derive(Default)]
pub struct ScriptedGateway {
    script: Mutex<Vec<GatewayScript>>,
    requests: Mutex<Vec<CheckoutRequest>>,
    hanging: Mutex<Vec<oneshot::Sender<PaymentOutcome>>>,
}

impl ScriptedGateway {
    pub fn new(script: Vec<GatewayScript>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script),
            ..Self::default()
        })
    }

    pub fn answering(status: &str, transaction_id: &str, amount: f64) -> Arc<Self> {
        Self::new(vec![GatewayScript::Answer(PaymentOutcome::from_callback(
            status,
            None,
            Some(transaction_id),
            Some(amount),
        ))])
    }

    pub fn requests(&self) -> Vec<CheckoutRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl PaymentGateway for ScriptedGateway {
    fn start_checkout(&self, request: CheckoutRequest) -> oneshot::Receiver<PaymentOutcome> {
        let (sender, receiver) = oneshot::channel();
        self.requests.lock().unwrap().push(request);

        let next = {
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                GatewayScript::Hang
            } else {
                script.remove(0)
            }
        };
        match next {
            GatewayScript::Answer(outcome) => {
                let _ = sender.send(outcome);
            }
            GatewayScript::Hang => self.hanging.lock().unwrap().push(sender),
            GatewayScript::Drop => drop(sender),
        }
        receiver
    }
}

/// In-memory backend whose writes can be switched off.
#[derive(Default)]
pub struct FailingPersistence {
    inner: MemoryPersistence,
    fail_writes: AtomicBool,
}

impl FailingPersistence {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl Persistence for FailingPersistence {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("quota exceeded".to_string()));
        }
        self.inner.write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("quota exceeded".to_string()));
        }
        self.inner.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Campaign, RecordMeta, Subscriber, SubscriberCreate};
    use crate::entities::CampaignAction;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Subscriber>(10);

        let create_task = tokio::spawn(async move {
            let payload = SubscriberCreate {
                email: "test@example.com".to_string(),
                source: None,
            };
            client.create(payload).await
        });

        let (record, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(record.payload.email, "test@example.com");
        assert!(record.id.is_none());

        let stored = Subscriber::from_create(RecordMeta::seed("sub_1"), record.payload).unwrap();
        responder.send(Ok(stored.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(stored));
    }

    #[tokio::test]
    async fn test_mock_action() {
        let (client, mut receiver) = create_mock_client::<Campaign>(10);

        let task = tokio::spawn(async move { client.perform_action("cmp_1", CampaignAction::ToggleActive).await });

        let (id, action, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        assert_eq!(id, "cmp_1");
        assert_eq!(action, CampaignAction::ToggleActive);
        responder.send(Ok(Some(false))).unwrap();

        assert_eq!(task.await.unwrap(), Ok(Some(false)));
    }

    #[tokio::test]
    async fn test_scripted_gateway_replays_in_order() {
        let gateway = ScriptedGateway::new(vec![
            GatewayScript::Answer(PaymentOutcome::Cancelled),
            GatewayScript::Drop,
        ]);
        let request = CheckoutRequest {
            tx_ref: "BRISK-1".to_string(),
            amount: 10.0,
            currency: "UGX".to_string(),
            payment_options: String::new(),
            customer: crate::donation_workflow::Customer {
                email: String::new(),
                phone_number: String::new(),
                name: String::new(),
            },
            customizations: crate::donation_workflow::Customization {
                title: String::new(),
                description: String::new(),
                logo: String::new(),
            },
        };

        assert_eq!(gateway.start_checkout(request.clone()).await, Ok(PaymentOutcome::Cancelled));
        assert!(gateway.start_checkout(request.clone()).await.is_err());

        let mut hanging = gateway.start_checkout(request);
        assert!(hanging.try_recv().is_err());
        assert_eq!(gateway.requests().len(), 3);
    }

    #[test]
    fn test_failing_persistence_toggle() {
        let backend = FailingPersistence::new();
        backend.write("k", "1").unwrap();
        backend.set_fail_writes(true);
        assert!(backend.write("k", "2").is_err());
        assert_eq!(backend.read("k").unwrap().as_deref(), Some("1"));
    }
}
