pub mod compare;
pub mod doctor;
