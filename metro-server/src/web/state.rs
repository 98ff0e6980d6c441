//! Application state for the web layer.

use std::sync::Arc;

use crate::booking::BookingService;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Booking service over the immutable network
    pub booking: Arc<BookingService>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(booking: BookingService) -> Self {
        Self {
            booking: Arc::new(booking),
        }
    }
}
