//! Page controller for the products screen: owns the page window, the create
//! modal and the request lifecycle, and drives the catalog client.

use std::sync::Arc;

use catalog_client::{create_product_with_sku, CatalogApi, CreateOutcome};
use shared::domain::{Direction, FormValues, PageRequest, PageWindow, ProductId, PAGE_SIZE};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

pub mod events;
pub mod state;

pub use events::{ControllerError, PageEvent};
pub use state::{CreateModal, CurrentPage, FormField, PageState, RequestState};

pub struct PageController {
    api: Arc<dyn CatalogApi>,
    page_size: u32,
    state: Mutex<PageState>,
    events: broadcast::Sender<PageEvent>,
}

impl PageController {
    pub fn new(api: Arc<dyn CatalogApi>) -> Arc<Self> {
        Self::with_page_size(api, PAGE_SIZE)
    }

    pub fn with_page_size(api: Arc<dyn CatalogApi>, page_size: u32) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            api,
            page_size: page_size.max(1),
            state: Mutex::new(PageState::default()),
            events,
        })
    }

    pub async fn snapshot(&self) -> PageState {
        self.state.lock().await.clone()
    }

    pub async fn can_start(&self) -> bool {
        self.state.lock().await.can_start()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<PageEvent> {
        self.events.subscribe()
    }

    pub async fn request_page(
        &self,
        cursor: Option<String>,
        direction: Direction,
    ) -> Result<PageWindow, ControllerError> {
        let request = PageRequest::new(cursor, direction);
        self.begin("request_page", |_| Ok(())).await?;
        self.load(request).await
    }

    /// Walks forward from the end cursor of the window currently on screen.
    pub async fn request_next_page(&self) -> Result<PageWindow, ControllerError> {
        let request = self
            .begin("request_next_page", |state| {
                let window = state
                    .window()
                    .filter(|window| window.has_next_page)
                    .ok_or(ControllerError::NoSuchPage(Direction::Next))?;
                Ok(PageRequest::new(window.end_cursor.clone(), Direction::Next))
            })
            .await?;
        self.load(request).await
    }

    /// Walks backward from the start cursor of the window currently on screen.
    pub async fn request_previous_page(&self) -> Result<PageWindow, ControllerError> {
        let request = self
            .begin("request_previous_page", |state| {
                let window = state
                    .window()
                    .filter(|window| window.has_previous_page)
                    .ok_or(ControllerError::NoSuchPage(Direction::Previous))?;
                Ok(PageRequest::new(
                    window.start_cursor.clone(),
                    Direction::Previous,
                ))
            })
            .await?;
        self.load(request).await
    }

    pub async fn refresh(&self) -> Result<PageWindow, ControllerError> {
        let request = self
            .begin("refresh", |state| Ok(state.current_request()))
            .await?;
        self.load(request).await
    }

    pub async fn open_create_modal(&self) {
        let mut state = self.state.lock().await;
        if !state.modal.is_open() {
            state.modal = CreateModal::Open(FormValues::default());
        }
    }

    /// Hides the modal and drops whatever was typed into it.
    pub async fn close_create_modal(&self) {
        self.state.lock().await.modal = CreateModal::Closed;
    }

    pub async fn update_form(&self, field: FormField) -> Result<(), ControllerError> {
        let mut state = self.state.lock().await;
        match &mut state.modal {
            CreateModal::Open(form) => {
                field.apply(form);
                Ok(())
            }
            CreateModal::Closed => Err(ControllerError::ModalClosed),
        }
    }

    /// Submits whatever the open modal currently holds.
    pub async fn submit_pending_form(&self) -> Result<CreateOutcome, ControllerError> {
        let values = self
            .begin("submit_create", |state| {
                state.modal.form().cloned().ok_or(ControllerError::ModalClosed)
            })
            .await?;
        self.create(values).await
    }

    pub async fn submit_create(&self, values: FormValues) -> Result<CreateOutcome, ControllerError> {
        self.begin("submit_create", |_| Ok(())).await?;
        self.create(values).await
    }

    /// Deletes one product, then re-fetches the page on screen since the row
    /// may be gone. The id does not have to be part of the current window.
    pub async fn request_delete(&self, product_id: ProductId) -> Result<(), ControllerError> {
        let refresh = self
            .begin("request_delete", |state| Ok(state.current_request()))
            .await?;

        if let Err(err) = self.api.delete_product(&product_id).await {
            return Err(self.fail(err.to_string()).await);
        }
        info!(%product_id, "product deleted");
        let _ = self.events.send(PageEvent::ProductDeleted(product_id));

        self.reload_after_write(refresh).await;
        Ok(())
    }

    async fn create(&self, values: FormValues) -> Result<CreateOutcome, ControllerError> {
        let outcome = match create_product_with_sku(self.api.as_ref(), &values).await {
            Ok(outcome) => outcome,
            Err(err) => return Err(self.fail(err.to_string()).await),
        };

        let refresh = {
            let mut state = self.state.lock().await;
            state.modal = CreateModal::Closed;
            state.current_request()
        };
        let _ = self
            .events
            .send(PageEvent::ProductCreated(outcome.clone()));

        self.reload_after_write(refresh).await;
        Ok(outcome)
    }

    /// The write already went through, so a failed reload only shows up as
    /// the error banner and never as the action's result.
    async fn reload_after_write(&self, refresh: PageRequest) {
        if let Err(err) = self.load(refresh).await {
            warn!(error = %err, "reload after write failed");
        }
    }

    /// Moves the lifecycle to `Loading` if nothing is in flight. `prepare`
    /// reads whatever the action needs from the same locked state.
    async fn begin<T>(
        &self,
        action: &'static str,
        prepare: impl FnOnce(&PageState) -> Result<T, ControllerError>,
    ) -> Result<T, ControllerError> {
        let mut state = self.state.lock().await;
        if state.request.is_loading() {
            debug!(action, "rejected while another request is in flight");
            return Err(ControllerError::Busy);
        }
        let prepared = prepare(&state)?;
        state.request = RequestState::Loading;
        debug!(action, "request started");
        Ok(prepared)
    }

    /// Fetches a window while `Loading` and makes it the only current one.
    async fn load(&self, request: PageRequest) -> Result<PageWindow, ControllerError> {
        let window = match self
            .api
            .list_products(self.page_size, request.cursor.as_deref(), request.direction)
            .await
        {
            Ok(window) => window,
            Err(err) => return Err(self.fail(err.to_string()).await),
        };

        {
            let mut state = self.state.lock().await;
            state.current = Some(CurrentPage {
                request,
                window: window.clone(),
            });
            state.request = RequestState::Idle;
        }
        debug!(rows = window.products.len(), "page window replaced");
        let _ = self.events.send(PageEvent::WindowReplaced(window.clone()));
        Ok(window)
    }

    async fn fail(&self, message: String) -> ControllerError {
        warn!(%message, "request failed");
        self.state.lock().await.request = RequestState::Error(message.clone());
        let _ = self.events.send(PageEvent::Failed(message.clone()));
        ControllerError::Failed(message)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
