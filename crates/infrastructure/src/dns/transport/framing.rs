//! Length-prefixed DNS message framing for stream transports (RFC 1035
//! §4.2.2): two-byte big-endian length followed by the message.

use split_dns_domain::DomainError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub(crate) async fn send_with_length_prefix<S>(
    stream: &mut S,
    message_bytes: &[u8],
) -> Result<(), DomainError>
where
    S: AsyncWriteExt + Unpin,
{
    let length = message_bytes.len() as u16;
    let length_bytes = length.to_be_bytes();

    stream
        .write_all(&length_bytes)
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to write length prefix: {}", e)))?;
    stream
        .write_all(message_bytes)
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to write DNS message: {}", e)))?;
    stream
        .flush()
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to flush stream: {}", e)))?;

    Ok(())
}

pub(crate) async fn read_with_length_prefix<S>(stream: &mut S) -> Result<Vec<u8>, DomainError>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream
        .read_exact(&mut len_buf)
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to read response length: {}", e)))?;

    // The two-byte prefix already bounds the message at 65535 bytes.
    let response_len = u16::from_be_bytes(len_buf) as usize;

    let mut response = vec![0u8; response_len];
    stream
        .read_exact(&mut response)
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to read response body: {}", e)))?;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip_through_duplex() {
        let (mut client, mut server) = tokio::io::duplex(256);
        let message = b"\x12\x34hello dns";

        send_with_length_prefix(&mut client, message).await.unwrap();
        let received = read_with_length_prefix(&mut server).await.unwrap();

        assert_eq!(received, message);
    }

    #[tokio::test]
    async fn test_empty_message() {
        let (mut client, mut server) = tokio::io::duplex(16);

        send_with_length_prefix(&mut client, &[]).await.unwrap();
        let received = read_with_length_prefix(&mut server).await.unwrap();

        assert!(received.is_empty());
    }
}
