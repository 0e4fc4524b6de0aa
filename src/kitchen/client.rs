use crate::kitchen::{KitchenError, KitchenRequest, PickedUpOrder};
use crate::model::{Order, OrderId, OrderRequest, ShelfSetStatus};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// What couriers and order sources need from a kitchen.
///
/// [`KitchenClient`] is the production implementation; tests can put any other
/// implementation behind an `Arc<dyn Kitchen>`.
#[async_trait]
pub trait Kitchen: Send + Sync {
    /// Prepare an order and put it on a shelf. Returns the prepared order.
    async fn receive_order(&self, request: OrderRequest) -> Result<Order, KitchenError>;

    /// Take an order off the shelves, together with the shelf snapshot after it
    /// left. `Ok(None)` means it is gone or was waste.
    async fn pickup_order(&self, id: &OrderId) -> Result<Option<PickedUpOrder>, KitchenError>;

    /// Snapshot of every shelf.
    async fn status(&self) -> Result<ShelfSetStatus, KitchenError>;
}

/// Cloneable handle to a running [`KitchenActor`](super::KitchenActor).
#[derive(Clone)]
pub struct KitchenClient {
    sender: mpsc::Sender<KitchenRequest>,
}

impl KitchenClient {
    pub fn new(sender: mpsc::Sender<KitchenRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> KitchenRequest,
    ) -> Result<T, KitchenError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| KitchenError::KitchenClosed)?;
        response.await.map_err(|_| KitchenError::KitchenDropped)
    }

    /// Evict waste from every shelf. Returns how many orders were discarded.
    #[instrument(skip(self))]
    pub async fn sweep_waste(&self) -> Result<usize, KitchenError> {
        debug!("Sending request");
        self.request(|respond_to| KitchenRequest::SweepWaste { respond_to })
            .await
    }

    /// Ask the actor to stop after the requests already queued.
    pub async fn shutdown(&self) -> Result<(), KitchenError> {
        self.sender
            .send(KitchenRequest::Shutdown)
            .await
            .map_err(|_| KitchenError::KitchenClosed)
    }
}

#[async_trait]
impl Kitchen for KitchenClient {
    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn receive_order(&self, request: OrderRequest) -> Result<Order, KitchenError> {
        debug!("Sending request");
        self.request(|respond_to| KitchenRequest::ReceiveOrder {
            request,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    async fn pickup_order(&self, id: &OrderId) -> Result<Option<PickedUpOrder>, KitchenError> {
        debug!("Sending request");
        let id = id.clone();
        self.request(|respond_to| KitchenRequest::PickupOrder { id, respond_to })
            .await
    }

    #[instrument(skip(self))]
    async fn status(&self) -> Result<ShelfSetStatus, KitchenError> {
        debug!("Sending request");
        self.request(|respond_to| KitchenRequest::Status { respond_to })
            .await
    }
}
