//! Compass routing-control protocol.
//!
//! Messages follow the [`CPS_DISPATCH`](crate::classify::CPS_DISPATCH) byte:
//!
//! ```text
//! PAM:  0xc0 | padding (4) | prefix length (u16 LE) | prefix
//! NAM:  0xc1 | header (1) | options (TLV, u16 LE length)
//! SOL:  0xc2
//! ```

use super::tlv::compass_tlvs;
use crate::error::ProtocolError;
use crate::format::decode_lossy;

/// Prefix advertisement message.
pub const CPS_PAM_TYPE: u8 = 0xc0;
/// Name advertisement message.
pub const CPS_NAM_TYPE: u8 = 0xc1;
/// Solicitation.
pub const CPS_SOL_TYPE: u8 = 0xc2;

/// NAM option carrying the advertised name.
pub const CPS_OPT_NAME: u8 = 0x00;

const PAM_PADDING_LEN: usize = 4;
const PAM_FIXED_LEN: usize = PAM_PADDING_LEN + 2;
const NAM_HEADER_LEN: usize = 1;

/// A decoded compass message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompassMessage {
    Pam { prefix: String },
    Nam { name: Option<String> },
    Sol,
    Unknown(u8),
}

/// Decode a compass message starting at its type byte.
pub fn decode(data: &[u8]) -> Result<CompassMessage, ProtocolError> {
    let (&msg_type, body) = data.split_first().ok_or(ProtocolError::TruncatedInput {
        protocol: "compass",
        needed: 1,
        have: 0,
    })?;

    match msg_type {
        CPS_PAM_TYPE => decode_pam(body),
        CPS_NAM_TYPE => Ok(CompassMessage::Nam {
            name: compass_tlvs(body.get(NAM_HEADER_LEN..).unwrap_or_default())
                .filter(|opt| opt.tag == CPS_OPT_NAME)
                .last()
                .map(|opt| decode_lossy(opt.value)),
        }),
        CPS_SOL_TYPE => Ok(CompassMessage::Sol),
        other => Ok(CompassMessage::Unknown(other)),
    }
}

fn decode_pam(body: &[u8]) -> Result<CompassMessage, ProtocolError> {
    if body.len() < PAM_FIXED_LEN {
        return Err(ProtocolError::TruncatedInput {
            protocol: "compass",
            needed: PAM_FIXED_LEN,
            have: body.len(),
        });
    }

    let declared = u16::from_le_bytes([body[PAM_PADDING_LEN], body[PAM_PADDING_LEN + 1]]) as usize;
    let rest = &body[PAM_FIXED_LEN..];
    let prefix = rest.get(..declared).ok_or(ProtocolError::PrefixLengthMismatch {
        declared,
        available: rest.len(),
    })?;

    Ok(CompassMessage::Pam {
        prefix: decode_lossy(prefix),
    })
}
