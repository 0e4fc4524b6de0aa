//! # Mock Kitchen
//!
//! A [`KitchenClient`] backed by a scripted task instead of real shelves.
//! Queue the requests you expect, hand out [`MockKitchen::client`], then call
//! [`MockKitchen::verify`] once the code under test has run.
//!
//! ```ignore
//! let mock = MockKitchen::new();
//! mock.expect_receive_order();
//! mock.expect_pickup(id.clone()).return_none();
//!
//! let kitchen = mock.client();
//! // drive the code under test...
//! mock.verify();
//! ```

use crate::kitchen::{KitchenClient, KitchenRequest, PickedUpOrder};
use crate::model::{Order, OrderId, OrderRequest, ShelfSetStatus};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

enum Expectation {
    ReceiveOrder,
    Pickup {
        id: OrderId,
        response: Option<PickedUpOrder>,
    },
    Status {
        response: ShelfSetStatus,
    },
}

pub struct MockKitchen {
    client: KitchenClient,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    received: Arc<Mutex<Vec<OrderRequest>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockKitchen {
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<KitchenRequest>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let received = Arc::new(Mutex::new(Vec::new()));
        let exps = expectations.clone();
        let seen = received.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = exps.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        KitchenRequest::ReceiveOrder {
                            request,
                            respond_to,
                        },
                        Some(Expectation::ReceiveOrder),
                    ) => {
                        seen.lock().unwrap().push(request.clone());
                        let _ = respond_to.send(Order::prepare(request));
                    }
                    (
                        KitchenRequest::PickupOrder { id, respond_to },
                        Some(Expectation::Pickup {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "pickup for unexpected order");
                        let _ = respond_to.send(response);
                    }
                    (KitchenRequest::Status { respond_to }, Some(Expectation::Status { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (KitchenRequest::Shutdown, _) => break,
                    (request, _) => panic!("Unexpected kitchen request: {request:?}"),
                }
            }
        });

        Self {
            client: KitchenClient::new(sender),
            expectations,
            received,
            _handle: handle,
        }
    }

    pub fn client(&self) -> KitchenClient {
        self.client.clone()
    }

    /// Expect one order arrival. The mock answers with a freshly prepared order.
    pub fn expect_receive_order(&self) -> &Self {
        self.push(Expectation::ReceiveOrder);
        self
    }

    pub fn expect_pickup(&self, id: OrderId) -> PickupExpectationBuilder<'_> {
        PickupExpectationBuilder { mock: self, id }
    }

    pub fn expect_status(&self, response: ShelfSetStatus) -> &Self {
        self.push(Expectation::Status { response });
        self
    }

    /// Requests the mock has accepted so far, in arrival order.
    pub fn received(&self) -> Vec<OrderRequest> {
        self.received.lock().unwrap().clone()
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        assert_eq!(remaining, 0, "{remaining} kitchen expectation(s) not met");
    }

    fn push(&self, expectation: Expectation) {
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

impl Default for MockKitchen {
    fn default() -> Self {
        Self::new()
    }
}

pub struct PickupExpectationBuilder<'a> {
    mock: &'a MockKitchen,
    id: OrderId,
}

impl PickupExpectationBuilder<'_> {
    /// Hand the order back along with the shelf snapshot a real kitchen would take.
    pub fn return_order(self, order: Order, status: ShelfSetStatus) {
        self.mock.push(Expectation::Pickup {
            id: self.id,
            response: Some(PickedUpOrder { order, status }),
        });
    }

    pub fn return_none(self) {
        self.mock.push(Expectation::Pickup {
            id: self.id,
            response: None,
        });
    }
}
