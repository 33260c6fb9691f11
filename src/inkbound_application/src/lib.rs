pub mod emails;
pub mod use_cases;

pub use use_cases::{
    change_password::{ChangePasswordError, ChangePasswordUseCase, MIN_PASSWORD_LENGTH},
    favorites::{
        AddFavoriteUseCase, FavoritesError, ListFavoritesUseCase, RemoveFavoriteUseCase,
    },
    forgot_password::{ForgotPasswordError, ForgotPasswordUseCase},
    login::{LoginError, LoginUseCase},
    profile::{
        AvatarUpload, GetProfileUseCase, ProfileError, UpdateProfileUseCase,
    },
    reading_progress::{
        LastChapterUseCase, ReadingListUseCase, ReadingProgressError, UpdateProgressUseCase,
    },
    register::{RegisterError, RegisterUseCase},
    resend_verification::{ResendVerificationError, ResendVerificationUseCase},
    send_verification::SendVerificationError,
    verify_email::{VerifyEmailError, VerifyEmailUseCase},
};
