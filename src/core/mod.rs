pub mod kinematics;
pub mod params;
pub mod session;
pub mod trajectory;
pub mod viewport;
