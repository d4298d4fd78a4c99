use service::AnimalService;

/// Router state. The store handle inside is created once at startup and
/// shared read-only by every request.
#[derive(Clone)]
pub struct AppState {
    pub animals: AnimalService,
}

impl AppState {
    pub fn new(animals: AnimalService) -> Self {
        Self { animals }
    }
}
