//! UI state of the products page, modelled as explicit tagged states so there
//! is one answer to "can a new action start now".

use shared::domain::{FormValues, PageRequest, PageWindow, ProductStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Error(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Text for the failure banner, if the last request failed.
    pub fn banner(&self) -> Option<String> {
        match self {
            Self::Error(message) => Some(format!("Something went wrong: {message}")),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CreateModal {
    #[default]
    Closed,
    Open(FormValues),
}

impl CreateModal {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn form(&self) -> Option<&FormValues> {
        match self {
            Self::Open(form) => Some(form),
            Self::Closed => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Title(String),
    Status(ProductStatus),
    Sku(String),
}

impl FormField {
    pub(crate) fn apply(self, form: &mut FormValues) {
        match self {
            Self::Title(title) => form.title = title,
            Self::Status(status) => form.status = status,
            Self::Sku(sku) => form.sku = sku,
        }
    }
}

/// The window on screen together with the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentPage {
    pub request: PageRequest,
    pub window: PageWindow,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageState {
    pub request: RequestState,
    pub modal: CreateModal,
    pub current: Option<CurrentPage>,
}

impl PageState {
    pub fn can_start(&self) -> bool {
        !self.request.is_loading()
    }

    pub fn window(&self) -> Option<&PageWindow> {
        self.current.as_ref().map(|current| &current.window)
    }

    /// Request that re-fetches the page on screen, or the first page.
    pub fn current_request(&self) -> PageRequest {
        self.current
            .as_ref()
            .map(|current| current.request.clone())
            .unwrap_or_default()
    }
}
