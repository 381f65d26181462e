pub mod criteria;
pub mod health;
pub mod input;
pub mod projects;
pub mod requirements;
pub mod stories;

pub use criteria::CriteriaController;
pub use health::HealthController;
pub use input::InputController;
pub use projects::ProjectsController;
pub use requirements::RequirementsController;
pub use stories::StoriesController;
