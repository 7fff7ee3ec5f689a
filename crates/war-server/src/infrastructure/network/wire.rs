//! Framed reads and writes on a peer stream.
//!
//! TCP is a stream protocol: one `read()` may return part of a message.
//! [`read_frame`] uses `read_exact`, which keeps reading until the whole frame
//! has arrived and fails with `UnexpectedEof` if the peer closes first, so a
//! short frame is never decoded.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use war_core::{
    decode_expected, encode_message, Card, CardError, Opcode, ProtocolError, WarMessage,
};

use crate::application::adjudicate::{CardViolation, Peer};
use crate::infrastructure::network::session::SessionError;

/// Reads exactly one frame that must carry the `expected` opcode.
///
/// Every peer-to-server message is two bytes long, so the server always
/// reads exactly two bytes here.
///
/// # Errors
///
/// - [`SessionError::Connection`] if the stream fails or ends mid-frame.
/// - [`SessionError::Protocol`] for an unknown or unexpected opcode.
/// - [`SessionError::CardViolation`] for a card byte outside `0..=51`.
pub async fn read_frame<R>(
    reader: &mut R,
    peer: Peer,
    expected: Opcode,
) -> Result<WarMessage, SessionError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; expected.frame_len()];
    reader
        .read_exact(&mut buf)
        .await
        .map_err(|source| SessionError::Connection { peer, source })?;

    decode_expected(&buf, expected).map_err(|err| match err {
        ProtocolError::InvalidCard(CardError::OutOfRange(card)) => {
            CardViolation::NotInHand { peer, card }.into()
        }
        source => SessionError::Protocol { peer, source },
    })
}

/// Reads one PLAYCARD frame and returns the card it carries.
///
/// # Errors
///
/// As [`read_frame`].
pub async fn read_card<R>(reader: &mut R, peer: Peer) -> Result<Card, SessionError>
where
    R: AsyncRead + Unpin,
{
    match read_frame(reader, peer, Opcode::PlayCard).await? {
        WarMessage::PlayCard(card) => Ok(card),
        other => Err(SessionError::Protocol {
            peer,
            source: ProtocolError::UnexpectedOpcode {
                expected: Opcode::PlayCard,
                found: other.opcode(),
            },
        }),
    }
}

/// Writes one message in full and flushes it.
///
/// # Errors
///
/// [`SessionError::Connection`] if any byte cannot be written.
pub async fn write_message<W>(
    writer: &mut W,
    peer: Peer,
    msg: &WarMessage,
) -> Result<(), SessionError>
where
    W: AsyncWrite + Unpin,
{
    let bytes = encode_message(msg);
    writer
        .write_all(&bytes)
        .await
        .map_err(|source| SessionError::Connection { peer, source })?;
    writer
        .flush()
        .await
        .map_err(|source| SessionError::Connection { peer, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::duplex;
    use war_core::PlayOutcome;

    #[tokio::test]
    async fn test_read_frame_accumulates_split_writes() {
        let (mut client, mut server) = duplex(64);
        let writer = tokio::spawn(async move {
            client.write_all(&[2]).await.unwrap();
            client.flush().await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            client.write_all(&[7]).await.unwrap();
            client
        });

        let msg = read_frame(&mut server, Peer::One, Opcode::PlayCard).await.unwrap();
        assert_eq!(msg, WarMessage::PlayCard(Card::new(7).unwrap()));
        drop(writer.await.unwrap());
    }

    #[tokio::test]
    async fn test_read_frame_eof_mid_frame_is_connection_fault() {
        let (mut client, mut server) = duplex(64);
        client.write_all(&[0]).await.unwrap();
        drop(client);

        let err = read_frame(&mut server, Peer::Two, Opcode::WantGame).await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Connection {
                peer: Peer::Two,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_read_frame_wrong_opcode_is_protocol_fault() {
        let (mut client, mut server) = duplex(64);
        client.write_all(&[2, 0]).await.unwrap();

        let err = read_frame(&mut server, Peer::One, Opcode::WantGame).await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Protocol {
                source: ProtocolError::UnexpectedOpcode { .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_read_frame_out_of_range_card_is_card_violation() {
        let (mut client, mut server) = duplex(64);
        client.write_all(&[2, 99]).await.unwrap();

        let err = read_frame(&mut server, Peer::One, Opcode::PlayCard).await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::CardViolation(CardViolation::NotInHand { card: 99, .. })
        ));
    }

    #[tokio::test]
    async fn test_write_message_sends_exact_bytes() {
        let (mut client, mut server) = duplex(64);
        write_message(&mut server, Peer::One, &WarMessage::PlayResult(PlayOutcome::Lose))
            .await
            .unwrap();

        let mut buf = [0u8; 2];
        client.read_exact(&mut buf).await.unwrap();
        assert_eq!(buf, [3, 2]);
    }
}
