mod appearance;
mod geolocation;
mod navigation;
mod notices;

pub use appearance::ManualAppearance;
pub use geolocation::ConfiguredGeolocation;
pub use navigation::StackNavigator;
pub use notices::ConsoleNotices;
