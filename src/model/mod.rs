pub mod request;
pub mod safety;
pub mod story;
pub mod story_elements;
