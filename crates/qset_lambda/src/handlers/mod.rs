pub mod answers;
pub mod cards;
pub mod response;
pub mod router;
pub mod sets;
