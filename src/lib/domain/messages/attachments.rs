//! Attachment collector

use tracing::debug;

use crate::domain::{
    communication::{
        mailer::Attachment,
        media::{MediaError, MediaStore},
    },
    forms::{errors::GetItemError, ItemRepository, ItemUri, SubmittedField},
};

use super::{errors::ProcessMessageError, MessageDraft};

/// Attaches the media referenced by `medialink` fields, in field order.
///
/// Values that are not item URIs, items that cannot be found and items
/// without media are skipped. Repository and media read failures abort.
pub async fn collect_attachments<R, S>(
    items: &R,
    media: &S,
    draft: &mut MessageDraft,
    fields: &[SubmittedField],
) -> Result<(), ProcessMessageError>
where
    R: ItemRepository,
    S: MediaStore,
{
    if !draft.include_attachment {
        return Ok(());
    }

    let media_fields = fields
        .iter()
        .filter(|field| field.parameters.is_media_link() && !field.value.is_empty());

    for field in media_fields {
        let Some(uri) = ItemUri::parse(&field.value) else {
            debug!("field {} is not an item uri, skipping", field.field_id);
            continue;
        };

        let item = match items.get_item_by_uri(&uri).await {
            Ok(item) => item,
            Err(GetItemError::ItemNotFound(_)) => {
                debug!("media item {} not found, skipping", uri);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let media_item = match media.get_media(&item).await {
            Ok(media_item) => media_item,
            Err(MediaError::NotMedia(id)) => {
                debug!("item {} has no media, skipping", id);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        debug!("attaching {}", media_item.filename());

        draft.attachments.push(Attachment {
            filename: media_item.filename(),
            content: media_item.content,
            mime_type: media_item.mime_type,
        });
    }

    Ok(())
}
