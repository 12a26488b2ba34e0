use crate::error::Result;
use crate::gemini::{Attachment, GeminiClient};
use crate::model::ChatMessage;

/// One inference turn. When the user sends an attachment with no text,
/// the model still needs a directive, so a default analysis request is
/// substituted.
pub async fn run(
    client: &GeminiClient,
    text: &str,
    attachment: Option<&Attachment>,
    thinking: bool,
) -> Result<String> {
    let text = effective_text(text, attachment);
    let reply = client.chat(&text, attachment, thinking).await?;
    Ok(reply)
}

/// One turn of an ongoing conversation. The transcript carries every
/// prior turn; the new user message is appended to it before the call so
/// the model sees the full exchange.
pub async fn run_session(
    client: &GeminiClient,
    transcript: &mut Vec<ChatMessage>,
    text: &str,
    attachment: Option<&Attachment>,
    thinking: bool,
) -> Result<String> {
    let text = effective_text(text, attachment);
    transcript.push(ChatMessage::user(text));
    let reply = match client.chat_session(transcript, attachment, thinking).await {
        Ok(reply) => reply,
        Err(e) => {
            // A failed turn is not part of the conversation.
            transcript.pop();
            return Err(e.into());
        }
    };
    transcript.push(ChatMessage::model(reply.clone()));
    Ok(reply)
}

fn effective_text(text: &str, attachment: Option<&Attachment>) -> String {
    if !text.trim().is_empty() {
        return text.to_string();
    }
    let kind = attachment.map(media_kind).unwrap_or("message");
    format!("Analyze this {}.", kind)
}

fn media_kind(attachment: &Attachment) -> &'static str {
    if attachment.mime_type.starts_with("image/") {
        "image"
    } else if attachment.mime_type.starts_with("video/") {
        "video"
    } else if attachment.mime_type.starts_with("audio/") {
        "audio"
    } else {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_with_attachment_asks_for_analysis() {
        let video = Attachment::new("AA==", "video/mp4");
        assert_eq!(effective_text("", Some(&video)), "Analyze this video.");
        let audio = Attachment::new("AA==", "audio/webm");
        assert_eq!(effective_text("  ", Some(&audio)), "Analyze this audio.");
    }

    #[test]
    fn user_text_passes_through_untouched() {
        let image = Attachment::new("AA==", "image/png");
        assert_eq!(effective_text("what is this?", Some(&image)), "what is this?");
    }
}
