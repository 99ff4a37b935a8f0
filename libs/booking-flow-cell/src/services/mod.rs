pub mod dates;
pub mod slots;
pub mod wizard;
pub mod gateway;
pub mod flow;
