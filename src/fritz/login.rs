//! Challenge/response login against `login_sid.lua?version=2`
//!
//! The box hands out a challenge. Challenges starting with `2$` carry PBKDF2
//! parameters; anything else is answered with the legacy MD5 scheme.

use std::thread;
use std::time::Duration;

use md5::{Digest, Md5};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use tracing::{debug, info};

use super::{Session, login_url, new_agent};
use crate::consts::INVALID_SID;
use crate::error::AuthError;
use crate::utils::short_sid;

#[derive(Debug, PartialEq, Eq)]
struct LoginState {
    challenge: String,
    /// Seconds the box refuses further attempts after recent failures
    block_time: u64,
}

impl LoginState {
    fn parse(xml: &str) -> Result<Self, AuthError> {
        let doc = parse_xml(xml)?;
        let challenge = element_text(&doc, "Challenge")?;
        let block_time = element_text(&doc, "BlockTime")?
            .parse()
            .map_err(|_| AuthError::Malformed("BlockTime is not a number".to_string()))?;
        Ok(Self {
            challenge,
            block_time,
        })
    }

    fn is_pbkdf2(&self) -> bool {
        self.challenge.starts_with("2$")
    }

    fn response(&self, password: &str) -> Result<String, AuthError> {
        if self.is_pbkdf2() {
            debug!("PBKDF2 supported");
            pbkdf2_response(&self.challenge, password)
        } else {
            debug!("falling back to MD5");
            Ok(md5_response(&self.challenge, password))
        }
    }
}

fn parse_xml(xml: &str) -> Result<roxmltree::Document<'_>, AuthError> {
    roxmltree::Document::parse(xml).map_err(|e| AuthError::Malformed(e.to_string()))
}

fn element_text(doc: &roxmltree::Document<'_>, tag: &str) -> Result<String, AuthError> {
    doc.descendants()
        .find(|n| n.has_tag_name(tag))
        .map(|n| n.text().unwrap_or_default().trim().to_string())
        .ok_or_else(|| AuthError::Malformed(format!("missing <{tag}>")))
}

/// Response to a `2$<iter1>$<salt1>$<iter2>$<salt2>` challenge:
/// `<salt2>$hex(pbkdf2(pbkdf2(password, salt1, iter1), salt2, iter2))`
pub(crate) fn pbkdf2_response(challenge: &str, password: &str) -> Result<String, AuthError> {
    let bad = || AuthError::BadChallenge {
        challenge: challenge.to_string(),
    };

    let parts: Vec<&str> = challenge.split('$').collect();
    let [_, iter1, salt1, iter2, salt2] = parts.as_slice() else {
        return Err(bad());
    };
    let iter1: u32 = iter1.parse().map_err(|_| bad())?;
    let iter2: u32 = iter2.parse().map_err(|_| bad())?;
    let salt1_bytes = hex::decode(salt1).map_err(|_| bad())?;
    let salt2_bytes = hex::decode(salt2).map_err(|_| bad())?;

    // First round uses the static salt, second the per-login one
    let mut hash1 = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt1_bytes, iter1, &mut hash1);
    let mut hash2 = [0u8; 32];
    pbkdf2_hmac::<Sha256>(&hash1, &salt2_bytes, iter2, &mut hash2);

    Ok(format!("{salt2}${}", hex::encode(hash2)))
}

/// Legacy response: `<challenge>-md5(utf16le("<challenge>-<password>"))`
pub(crate) fn md5_response(challenge: &str, password: &str) -> String {
    let text = format!("{challenge}-{password}");
    let utf16le: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
    let digest = Md5::digest(&utf16le);
    format!("{challenge}-{}", hex::encode(digest))
}

impl Session {
    /// Run the login handshake once. No retry on failure.
    pub(crate) fn login(
        url: &str,
        username: &str,
        password: &str,
        timeout: Duration,
    ) -> Result<Self, AuthError> {
        let agent = new_agent(timeout);
        let endpoint = login_url(url);

        debug!(url = %endpoint, "requesting login challenge");
        let mut reply = agent
            .get(&endpoint)
            .call()
            .map_err(|source| AuthError::Challenge {
                url: endpoint.clone(),
                source,
            })?;
        let body = reply
            .body_mut()
            .read_to_string()
            .map_err(|source| AuthError::Challenge {
                url: endpoint.clone(),
                source,
            })?;
        let state = LoginState::parse(&body)?;
        let response = state.response(password)?;

        if state.block_time > 0 {
            info!(seconds = state.block_time, "login blocked by the box, waiting");
            thread::sleep(Duration::from_secs(state.block_time));
        }

        let mut reply = agent
            .post(&endpoint)
            .send_form([("username", username), ("response", response.as_str())])
            .map_err(|source| AuthError::Response {
                url: endpoint.clone(),
                source,
            })?;
        let body = reply
            .body_mut()
            .read_to_string()
            .map_err(|source| AuthError::Response {
                url: endpoint.clone(),
                source,
            })?;
        let sid = element_text(&parse_xml(&body)?, "SID")?;

        if sid.is_empty() || sid == INVALID_SID {
            return Err(AuthError::InvalidCredentials);
        }

        info!(user = %username, sid = %short_sid(&sid), "login successful");
        Ok(Session {
            agent,
            url: url.to_string(),
            sid,
        })
    }
}
