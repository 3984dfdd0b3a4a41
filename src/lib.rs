pub mod config;
pub mod events;
pub mod loading;
pub mod messages;
pub mod presenter;
pub mod utils;

pub use config::PresenterConfig;
pub use events::{PresenterEvent, PresenterEventBus, StatsSnapshot};
pub use loading::{LoadingCounter, LoadingGuard};
pub use messages::{Message, MessageId, MessageQueue};
pub use presenter::{
    EventSink, PresentationState, PresenterError, SearchInvocationError, SearchPresenter,
    SearchSource, UiEvent,
};
