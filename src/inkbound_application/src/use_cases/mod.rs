pub mod change_password;
pub mod favorites;
pub mod forgot_password;
pub mod login;
pub mod profile;
pub mod reading_progress;
pub mod register;
pub mod resend_verification;
pub mod send_verification;
pub mod verify_email;
