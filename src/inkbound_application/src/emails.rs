//! Bodies for the two transactional mails the service sends.

use inkbound_core::VerificationCode;
use secrecy::{ExposeSecret, Secret};

/// Subject and HTML body for the verification mail. The plaintext code is
/// embedded in the link and exists nowhere else once this mail is sent.
pub fn verification_email(base_url: &str, code: &VerificationCode) -> (String, String) {
    let link = format!("{}/api/verify/{}", base_url.trim_end_matches('/'), code);
    let subject = "Verify your Inkbound account".to_string();
    let body = format!(
        r#"<html>
  <body>
    <h1>Welcome to Inkbound!</h1>
    <p>Thanks for signing up. Click the button below to verify your email address:</p>
    <p><a href="{link}">Verify now</a></p>
    <p>The link expires in <strong>1 hour</strong>. If you did not request this email, you can ignore it.</p>
  </body>
</html>"#
    );
    (subject, body)
}

/// Subject and HTML body for the forgot-password mail carrying the freshly
/// generated temporary password.
pub fn password_reset_email(new_password: &Secret<String>) -> (String, String) {
    let subject = "Your Inkbound password was reset".to_string();
    let body = format!(
        r#"<html>
  <body>
    <h1>Password reset</h1>
    <p>We reset the password for your account. Use the temporary password below to log in:</p>
    <p><strong>{password}</strong></p>
    <p>We recommend changing it right after logging in. If you did not request this reset, contact support immediately.</p>
  </body>
</html>"#,
        password = new_password.expose_secret()
    );
    (subject, body)
}
