pub mod candidate_dto;
pub mod page_dto;
pub mod payment_dto;
pub mod session_dto;
