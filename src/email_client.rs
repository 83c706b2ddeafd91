use mail_send::{SmtpClientBuilder, mail_builder::MessageBuilder};

/// SMTP client, built once in `main` and injected through `AppState`.
/// A fresh connection is opened per message; the clinic sends mail rarely
/// enough that pooling is not worth it.
#[derive(Clone)]
pub struct EmailClient {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub from: String,
    pub username: String,
    pub password: String,
}

impl EmailClient {
    pub async fn send(
        &self,
        to: impl AsRef<str>,
        subject: impl AsRef<str>,
        body: impl AsRef<str>,
    ) -> Result<(), mail_send::Error> {
        let message = MessageBuilder::new()
            .from(self.from.as_str())
            .to(to.as_ref())
            .subject(subject.as_ref())
            .text_body(body.as_ref());

        SmtpClientBuilder::new(self.smtp_server.as_str(), self.smtp_port)
            .implicit_tls(false)
            .credentials((self.username.as_str(), self.password.as_str()))
            .connect()
            .await?
            .send(message)
            .await?;

        Ok(())
    }
}
