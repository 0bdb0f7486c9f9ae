pub mod forecast;
pub mod observation;
pub mod settings;
pub mod station;
