use catalog_client::CreateOutcome;
use shared::domain::{Direction, PageWindow, ProductId};
use thiserror::Error;

/// Notifications for whatever renders the page.
#[derive(Debug, Clone)]
pub enum PageEvent {
    WindowReplaced(PageWindow),
    ProductCreated(CreateOutcome),
    ProductDeleted(ProductId),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("another request is still in flight")]
    Busy,
    #[error("the create form is not open")]
    ModalClosed,
    #[error("there is no {0} page")]
    NoSuchPage(Direction),
    #[error("{0}")]
    Failed(String),
}
