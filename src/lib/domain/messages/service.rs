//! Message processor service

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::{
    communication::{links::LinkResolver, mailer::MailTransport, media::MediaStore},
    forms::{errors::GetItemError, FieldProvider, ItemRepository, SubmittedField},
};

use super::{
    attachments::collect_attachments, composer::compose, errors::ProcessMessageError,
    formatter::format_value, links::expand_dynamic_links, recipient::build_to_from_recipient,
    sanitizer::sanitize, tokens::FieldTokens, HostUrls, MessageDraft,
};

/// Message processor
#[async_trait]
pub trait MessageProcessor: Clone + Send + Sync + 'static {
    /// Resolves every token in the draft, collects attachments and sends it.
    ///
    /// # Arguments
    /// * `draft` - The [`MessageDraft`] built from the notification template.
    /// * `fields` - The submitted form fields, in form order.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] once the transport accepted the message,
    /// or an [`Err`] containing the [`ProcessMessageError`] that aborted it.
    async fn process(
        &self,
        draft: &mut MessageDraft,
        fields: &[SubmittedField],
    ) -> Result<(), ProcessMessageError>;
}

/// Message processor implementation
#[derive(Debug, Clone)]
pub struct MessageProcessorImpl<R, F, L, S, T>
where
    R: ItemRepository,
    F: FieldProvider,
    L: LinkResolver,
    S: MediaStore,
    T: MailTransport,
{
    hosts: HostUrls,
    items: Arc<R>,
    field_provider: Arc<F>,
    links: Arc<L>,
    media: Arc<S>,
    transport: Arc<T>,
}

impl<R, F, L, S, T> MessageProcessorImpl<R, F, L, S, T>
where
    R: ItemRepository,
    F: FieldProvider,
    L: LinkResolver,
    S: MediaStore,
    T: MailTransport,
{
    /// Creates a new message processor.
    pub fn new(
        hosts: HostUrls,
        items: Arc<R>,
        field_provider: Arc<F>,
        links: Arc<L>,
        media: Arc<S>,
        transport: Arc<T>,
    ) -> Self {
        Self {
            hosts,
            items,
            field_provider,
            links,
            media,
            transport,
        }
    }

    /// Expands dynamic content links in the body
    pub fn expand_links(&self, draft: &mut MessageDraft) {
        expand_dynamic_links(self.links.as_ref(), &mut draft.body);
    }

    /// Substitutes the tokens of every field, one field at a time, across
    /// the body, sender, recipients and subject. Unknown fields are skipped.
    pub async fn expand_tokens(
        &self,
        draft: &mut MessageDraft,
        fields: &[SubmittedField],
    ) -> Result<(), ProcessMessageError> {
        for field in fields {
            let item = match self.items.get_item(&field.field_id).await {
                Ok(item) => item,
                Err(GetItemError::ItemNotFound(id)) => {
                    debug!("field item {} not found, skipping", id);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let metadata = self.items.create_field_item(&item);
            let value = self.field_value(field, draft);

            FieldTokens::new(&metadata, field, &value).apply(draft);
        }

        Ok(())
    }

    /// Makes root-relative item links in the body absolute
    pub fn add_host_to_item_link(&self, draft: &mut MessageDraft) {
        self.hosts.add_host_to_item_link(&mut draft.body);
    }

    /// Makes `~/` media links in the body absolute
    pub fn add_host_to_media_link(&self, draft: &mut MessageDraft) {
        self.hosts.add_host_to_media_link(&mut draft.body);
    }

    /// Attaches media referenced by `medialink` fields
    pub async fn add_attachments(
        &self,
        draft: &mut MessageDraft,
        fields: &[SubmittedField],
    ) -> Result<(), ProcessMessageError> {
        collect_attachments(self.items.as_ref(), self.media.as_ref(), draft, fields).await
    }

    /// Sets `to` from the recipient field and gateway, if configured
    pub fn build_to_from_recipient(&self, draft: &mut MessageDraft, fields: &[SubmittedField]) {
        build_to_from_recipient(draft, fields);
    }

    /// Composes the message and hands it to the transport
    pub async fn send_email(&self, draft: &mut MessageDraft) -> Result<(), ProcessMessageError> {
        let message = compose(draft)?;

        self.transport.send(&draft.transport, &message).await?;

        info!(
            "sent \"{}\" to {} recipient(s) via {}",
            message.subject,
            message.to.len() + message.cc.len() + message.bcc.len(),
            draft.transport.host
        );

        Ok(())
    }

    fn field_value(&self, field: &SubmittedField, draft: &MessageDraft) -> String {
        let value = self
            .field_provider
            .get_adapted_value(&field.field_id, &field.value);
        let value = sanitize(&value, &self.hosts);

        format_value(
            &field.parameters,
            value,
            draft.message_type,
            draft.is_body_html,
        )
    }
}

#[async_trait]
impl<R, F, L, S, T> MessageProcessor for MessageProcessorImpl<R, F, L, S, T>
where
    R: ItemRepository,
    F: FieldProvider,
    L: LinkResolver,
    S: MediaStore,
    T: MailTransport,
{
    async fn process(
        &self,
        draft: &mut MessageDraft,
        fields: &[SubmittedField],
    ) -> Result<(), ProcessMessageError> {
        debug!("processing message with {} field(s)", fields.len());

        self.expand_links(draft);
        self.expand_tokens(draft, fields).await?;
        self.add_host_to_item_link(draft);
        self.add_host_to_media_link(draft);
        self.add_attachments(draft, fields).await?;
        self.build_to_from_recipient(draft, fields);
        self.send_email(draft).await
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use testresult::TestResult;

    use crate::domain::{
        communication::{
            mailer::{Credentials, MailerError, TransportSettings},
            media::MediaItem,
            tests::{MockLinkResolver, MockMailTransport, MockMediaStore},
        },
        forms::{
            tests::{MockFieldProvider, MockItemRepository},
            FieldMetadata, Item,
        },
        messages::{errors::ComposeError, MessageType},
    };

    use super::*;

    const NAME_ID: &str = "{11111111-1111-1111-1111-111111111111}";
    const CARD_ID: &str = "{22222222-2222-2222-2222-222222222222}";
    const PHONE_ID: &str = "{33333333-3333-3333-3333-333333333333}";
    const CV_ID: &str = "{44444444-4444-4444-4444-444444444444}";

    type Processor = MessageProcessorImpl<
        MockItemRepository,
        MockFieldProvider,
        MockLinkResolver,
        MockMediaStore,
        MockMailTransport,
    >;

    fn catalog() -> Vec<Item> {
        vec![
            Item {
                id: NAME_ID.to_string(),
                name: "name".to_string(),
                display_name: "Full Name".to_string(),
            },
            Item {
                id: CARD_ID.to_string(),
                name: "card".to_string(),
                display_name: "Card Number".to_string(),
            },
            Item {
                id: PHONE_ID.to_string(),
                name: "phone".to_string(),
                display_name: "Phone".to_string(),
            },
        ]
    }

    fn items() -> MockItemRepository {
        let mut items = MockItemRepository::new();
        let catalog = catalog();

        items.expect_get_item().returning(move |id| {
            catalog
                .iter()
                .find(|item| item.id == id)
                .cloned()
                .ok_or_else(|| GetItemError::ItemNotFound(id.to_string()))
        });
        items
            .expect_create_field_item()
            .returning(|item| FieldMetadata::from(item));
        items.expect_get_item_by_uri().returning(|_| {
            Ok(Item {
                id: CV_ID.to_string(),
                name: "cv".to_string(),
                display_name: String::new(),
            })
        });

        items
    }

    fn field_provider() -> MockFieldProvider {
        let mut provider = MockFieldProvider::new();
        provider
            .expect_get_adapted_value()
            .returning(|_, value| value.to_string());
        provider
    }

    fn links() -> MockLinkResolver {
        let mut links = MockLinkResolver::new();
        links
            .expect_expand_dynamic_links()
            .returning(|text| text.to_string());
        links
    }

    fn processor(transport: MockMailTransport, media: MockMediaStore) -> TestResult<Processor> {
        Ok(MessageProcessorImpl::new(
            HostUrls::new("https://forms.example.com")?,
            Arc::new(items()),
            Arc::new(field_provider()),
            Arc::new(links()),
            Arc::new(media),
            Arc::new(transport),
        ))
    }

    fn fields() -> Vec<SubmittedField> {
        vec![
            SubmittedField::new(NAME_ID, "fullName", "Jane <b onclick=\"x()\">Doe</b>", ""),
            SubmittedField::new(CARD_ID, "cardNumber", "4111 1111", "secure;<schidden>"),
            SubmittedField::new(PHONE_ID, "phone", "5551234", ""),
        ]
    }

    fn draft() -> MessageDraft {
        MessageDraft {
            body: format!(
                r#"<p>[<label id="{NAME_ID}">Full Name</label>] paid with [<label id="{CARD_ID}">Card Number</label>] ([<label id="{CARD_ID}" renderfield="Value">Card Number</label>])</p><a href="/privacy">privacy</a>"#
            ),
            subject: "Order from [Full Name]".to_string(),
            from: "forms@example.com".to_string(),
            to: "owner@example.com".to_string(),
            cc: "[Text: Phone]@sms.example.com".to_string(),
            is_body_html: true,
            transport: TransportSettings {
                host: "smtp.example.com".to_string(),
                port: 2525,
                enable_ssl: true,
                credentials: Some(Credentials::new("mailer", "secret")),
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_process_sends_resolved_message() -> TestResult {
        let mut transport = MockMailTransport::new();

        transport
            .expect_send()
            .times(1)
            .withf(|settings, message| {
                settings.host == "smtp.example.com"
                    && settings.port == 2525
                    && message.subject == "Order from Jane <b>Doe</b>"
                    && message.body
                        == r#"<p>Jane <b>Doe</b> paid with **** **** (4111 1111)</p><a href="https://forms.example.com/privacy">privacy</a>"#
                    && message.cc.len() == 1
                    && message.cc[0].as_str() == "5551234@sms.example.com"
            })
            .returning(|_, _| Ok(()));

        let processor = processor(transport, MockMediaStore::new())?;
        let mut draft = draft();

        processor.process(&mut draft, &fields()).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_field_is_skipped() -> TestResult {
        let mut transport = MockMailTransport::new();

        transport
            .expect_send()
            .times(1)
            .withf(|_, message| message.body == "[Unknown] Jane")
            .returning(|_, _| Ok(()));

        let processor = processor(transport, MockMediaStore::new())?;
        let mut draft = MessageDraft {
            body: format!("[Unknown] {NAME_ID}"),
            cc: String::new(),
            ..draft()
        };
        let fields = vec![
            SubmittedField::new("{99999999-9999-9999-9999-999999999999}", "unknown", "x", ""),
            SubmittedField::new(NAME_ID, "fullName", "Jane", ""),
        ];

        processor.process(&mut draft, &fields).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_sender_is_never_sent() -> TestResult {
        let mut transport = MockMailTransport::new();
        transport.expect_send().times(0);

        let processor = processor(transport, MockMediaStore::new())?;
        let mut draft = MessageDraft {
            from: "not-an-email".to_string(),
            ..draft()
        };

        let result = processor.process(&mut draft, &fields()).await;

        assert!(matches!(
            result,
            Err(ProcessMessageError::Compose(ComposeError::InvalidSender(_)))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_sender_resolved_from_field() -> TestResult {
        let mut transport = MockMailTransport::new();
        transport
            .expect_send()
            .times(1)
            .withf(|_, message| message.from.as_str() == "jane@example.com")
            .returning(|_, _| Ok(()));

        let processor = processor(transport, MockMediaStore::new())?;
        let mut draft = MessageDraft {
            from: "[Value: Full Name]".to_string(),
            cc: String::new(),
            ..draft()
        };
        let fields = vec![SubmittedField::new(NAME_ID, "fullName", "jane@example.com", "")];

        processor.process(&mut draft, &fields).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_sms_to_gateway() -> TestResult {
        let mut transport = MockMailTransport::new();
        transport
            .expect_send()
            .times(1)
            .withf(|_, message| {
                message.to.len() == 1
                    && message.to[0].as_str() == "5551234@sms.example.com"
                    && message.body == "Hi Jane <b>Doe</b>, card 4111 1111"
                    && !message.is_body_html
            })
            .returning(|_, _| Ok(()));

        let processor = processor(transport, MockMediaStore::new())?;
        let mut draft = MessageDraft {
            body: "Hi [Full Name], card [card]".to_string(),
            to: "ignored@example.com".to_string(),
            cc: String::new(),
            message_type: MessageType::Sms,
            is_body_html: false,
            recipient: PHONE_ID.to_string(),
            recipient_gateway: "@sms.example.com".to_string(),
            ..draft()
        };

        processor.process(&mut draft, &fields()).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_attachments_are_sent() -> TestResult {
        let mut media = MockMediaStore::new();
        media.expect_get_media().times(1).returning(|_| {
            Ok(MediaItem {
                name: "cv".to_string(),
                extension: "pdf".to_string(),
                mime_type: "application/pdf".to_string(),
                content: b"%PDF".to_vec(),
            })
        });

        let mut transport = MockMailTransport::new();
        transport
            .expect_send()
            .times(1)
            .withf(|_, message| {
                message.attachments.len() == 1 && message.attachments[0].filename == "cv.pdf"
            })
            .returning(|_, _| Ok(()));

        let processor = processor(transport, media)?;
        let mut draft = MessageDraft {
            include_attachment: true,
            ..draft()
        };
        let mut fields = fields();
        fields.push(SubmittedField::new(
            CV_ID,
            "cv",
            &format!("sitecore://master/{CV_ID}?lang=en&ver=1"),
            "medialink",
        ));

        processor.process(&mut draft, &fields).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_repository_failure_aborts() -> TestResult {
        let mut items = MockItemRepository::new();
        items
            .expect_get_item()
            .returning(|_| Err(GetItemError::UnknownError(anyhow!("connection reset"))));

        let mut transport = MockMailTransport::new();
        transport.expect_send().times(0);

        let processor = MessageProcessorImpl::new(
            HostUrls::new("https://forms.example.com")?,
            Arc::new(items),
            Arc::new(field_provider()),
            Arc::new(links()),
            Arc::new(MockMediaStore::new()),
            Arc::new(transport),
        );
        let mut draft = draft();

        let result = processor.process(&mut draft, &fields()).await;

        assert!(matches!(result, Err(ProcessMessageError::Repository(_))));

        Ok(())
    }

    #[tokio::test]
    async fn test_transport_error_is_propagated() -> TestResult {
        let mut transport = MockMailTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_, _| Err(MailerError::SendError));

        let processor = processor(transport, MockMediaStore::new())?;
        let mut draft = draft();

        let result = processor.process(&mut draft, &fields()).await;

        assert!(matches!(
            result,
            Err(ProcessMessageError::Transport(MailerError::SendError))
        ));

        Ok(())
    }
}
