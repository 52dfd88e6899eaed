use serde::Deserialize;
use strum_macros::{Display, EnumString};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::{ProtocolError, Tree};

/// Upper bound on a single request or reply
pub const DEFAULT_MAX_PAYLOAD: usize = 64 * 1024;

/// Deepest [`Tree`] both formats decode
///
/// Each tree level nests two maps and both decoders stop at 128 levels of
/// nesting, so this leaves headroom below that.
pub const MAX_DEPTH: usize = 60;

const READ_CHUNK: usize = 4096;

/// Surface syntax of the payload; both dialects carry the same schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Json,
    Yaml,
}

impl Default for Format {
    fn default() -> Self {
        Format::Json
    }
}

impl Format {
    pub fn encode(self, tree: &Tree) -> Result<Vec<u8>, ProtocolError> {
        match self {
            Format::Json => {
                serde_json::to_vec(tree).map_err(|e| ProtocolError::Encode(e.to_string()))
            }
            Format::Yaml => serde_yaml::to_string(tree)
                .map(String::into_bytes)
                .map_err(|e| ProtocolError::Encode(e.to_string())),
        }
    }

    pub fn decode(self, payload: &[u8]) -> Result<Tree, ProtocolError> {
        if payload.iter().all(u8::is_ascii_whitespace) {
            return Err(ProtocolError::EmptyPayload);
        }

        match self {
            Format::Json => {
                serde_json::from_slice(payload).map_err(|e| ProtocolError::Decode(e.to_string()))
            }
            Format::Yaml => {
                serde_yaml::from_slice(payload).map_err(|e| ProtocolError::Decode(e.to_string()))
            }
        }
    }
}

/// Reads one message and decodes it with `format`
///
/// The message ends as soon as the bytes received so far decode, so the peer
/// need not shut down its write half. Reaching EOF first decodes whatever
/// arrived, and more than `limit` bytes without a complete message fails.
pub async fn read_payload<R: AsyncRead + Unpin>(
    reader: &mut R,
    format: Format,
    limit: usize,
) -> Result<Tree, ProtocolError> {
    let mut payload = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        let read = reader.read(&mut chunk).await?;
        if read == 0 {
            return format.decode(&payload);
        }

        payload.extend_from_slice(&chunk[..read]);
        if payload.len() > limit {
            return Err(ProtocolError::PayloadTooLarge(limit));
        }

        if let Ok(tree) = format.decode(&payload) {
            return Ok(tree);
        }
    }
}

/// Writes a whole message, then shuts down the write half
pub async fn write_payload<W: AsyncWrite + Unpin>(
    writer: &mut W,
    payload: &[u8],
) -> Result<(), ProtocolError> {
    writer.write_all(payload).await?;
    writer.flush().await?;
    writer.shutdown().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Node;

    fn sample() -> Tree {
        Tree {
            node: Node {
                value: "-".to_string(),
                left: Some(Box::new(Tree::leaf("10"))),
                right: Some(Box::new(Tree {
                    node: Node {
                        value: "/".to_string(),
                        left: Some(Box::new(Tree::leaf("4"))),
                        right: Some(Box::new(Tree::leaf("2"))),
                    },
                })),
            },
        }
    }

    #[test]
    fn test_json_schema() -> Result<(), Box<dyn std::error::Error>> {
        let encoded = Format::Json.encode(&Tree::leaf("42"))?;
        assert_eq!(
            std::str::from_utf8(&encoded)?,
            r#"{"node":{"value":"42","left":null,"right":null}}"#
        );
        Ok(())
    }

    #[test]
    fn test_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        for format in [Format::Json, Format::Yaml].iter() {
            let encoded = format.encode(&sample())?;
            assert_eq!(format.decode(&encoded)?, sample());
        }
        Ok(())
    }

    #[test]
    fn test_yaml_decode() -> Result<(), Box<dyn std::error::Error>> {
        let payload = "node:\n  value: \"*\"\n  left:\n    node:\n      value: \"6\"\n      left: null\n      right: null\n  right:\n    node:\n      value: \"7\"\n      left: null\n      right: null\n";

        let tree = Format::Yaml.decode(payload.as_bytes())?;
        assert_eq!(tree.node.value, "*");
        assert_eq!(tree.node.left, Some(Box::new(Tree::leaf("6"))));
        assert_eq!(tree.node.right, Some(Box::new(Tree::leaf("7"))));
        Ok(())
    }

    #[test]
    fn test_children_are_required() -> Result<(), Box<dyn std::error::Error>> {
        let tree = Format::Json.decode(br#"{"node":{"value":"3","left":null,"right":null}}"#)?;
        assert_eq!(tree, Tree::leaf("3"));

        match Format::Json.decode(br#"{"node":{"value":"3"}}"#) {
            Err(ProtocolError::Decode(_)) => {}
            r => panic!("{:?} doesn't match", r),
        }

        // Everything up to the outer right child, as a partial read may see it
        let encoded = String::from_utf8(Format::Yaml.encode(&sample())?)?;
        let cut = encoded.find("\n  right:").ok_or("no right child")?;
        match Format::Yaml.decode(encoded[..=cut].as_bytes()) {
            Err(ProtocolError::Decode(_)) => {}
            r => panic!("{:?} doesn't match", r),
        }
        Ok(())
    }

    #[test]
    fn test_decode_errors() {
        for format in [Format::Json, Format::Yaml].iter() {
            assert_eq!(format.decode(b"").unwrap_err(), ProtocolError::EmptyPayload);
            assert_eq!(
                format.decode(b" \n").unwrap_err(),
                ProtocolError::EmptyPayload
            );
        }

        match Format::Json.decode(br#"{"node":{"value":"4""#) {
            Err(ProtocolError::Decode(_)) => {}
            r => panic!("{:?} doesn't match", r),
        }

        match Format::Yaml.decode(b"node:\n  value: [") {
            Err(ProtocolError::Decode(_)) => {}
            r => panic!("{:?} doesn't match", r),
        }
    }

    #[test]
    fn test_format_names() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("json".parse::<Format>()?, Format::Json);
        assert_eq!("yaml".parse::<Format>()?, Format::Yaml);
        assert_eq!(Format::Yaml.to_string(), "yaml");
        assert_eq!(Format::default(), Format::Json);
        Ok(())
    }

    fn chain(operators: usize) -> Tree {
        (0..operators).fold(Tree::leaf("1"), |left, _| Tree {
            node: Node {
                value: "+".to_string(),
                left: Some(Box::new(left)),
                right: Some(Box::new(Tree::leaf("1"))),
            },
        })
    }

    #[test]
    fn test_deepest_tree_round_trips() -> Result<(), Box<dyn std::error::Error>> {
        // A chain of n operators is n + 1 levels deep
        let deepest = chain(MAX_DEPTH - 1);
        for format in [Format::Json, Format::Yaml].iter() {
            let encoded = format.encode(&deepest)?;
            assert_eq!(format.decode(&encoded)?, deepest);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_payload_io() -> Result<(), Box<dyn std::error::Error>> {
        for format in [Format::Json, Format::Yaml].iter() {
            let mut buf = Vec::new();
            write_payload(&mut buf, &format.encode(&sample())?).await?;

            let mut reader: &[u8] = &buf;
            let tree = read_payload(&mut reader, *format, DEFAULT_MAX_PAYLOAD).await?;
            assert_eq!(tree, sample());
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_read_without_eof() -> Result<(), Box<dyn std::error::Error>> {
        let (mut client, mut server) = tokio::io::duplex(64);
        let payload = Format::Json.encode(&sample())?;

        // The writer stays open, so the message must end once it decodes
        let (written, read) = tokio::join!(
            client.write_all(&payload),
            read_payload(&mut server, Format::Json, DEFAULT_MAX_PAYLOAD)
        );
        written?;
        assert_eq!(read?, sample());
        Ok(())
    }

    #[tokio::test]
    async fn test_read_errors_at_eof() {
        let mut reader: &[u8] = b"";
        assert_eq!(
            read_payload(&mut reader, Format::Json, 16).await.unwrap_err(),
            ProtocolError::EmptyPayload
        );

        let mut reader: &[u8] = br#"{"node":{"val"#;
        match read_payload(&mut reader, Format::Json, 64).await {
            Err(ProtocolError::Decode(_)) => {}
            r => panic!("{:?} doesn't match", r),
        }
    }

    #[tokio::test]
    async fn test_payload_limit() {
        let mut reader: &[u8] = b"0123456789";
        assert_eq!(
            read_payload(&mut reader, Format::Json, 4).await.unwrap_err(),
            ProtocolError::PayloadTooLarge(4)
        );
    }
}
