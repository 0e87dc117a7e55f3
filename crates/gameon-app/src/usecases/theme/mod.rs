mod resolver;

pub use resolver::ThemeResolver;
