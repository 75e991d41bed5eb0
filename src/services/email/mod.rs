pub mod resend;
pub mod sender;
pub mod verification;

pub use resend::ResendEmailSender;
pub use sender::{EmailError, EmailMessage, EmailSender, LogEmailSender};
pub use verification::{VerificationError, VerificationMailer};
