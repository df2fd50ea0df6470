// Infrastructure layer - configuration and default collaborator implementations
pub mod palette;
pub mod settings;
