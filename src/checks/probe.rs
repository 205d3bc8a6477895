//! Live certificate probing over TLS
//!
//! Opens a TLS connection to one host and extracts the leaf certificate's
//! expiry timestamp. The handshake uses a verifier that accepts any
//! certificate: this is a monitoring probe reading the stated validity
//! window, not a validator.

use crate::error::ProbeError;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, Error as RustlsError, SignatureScheme};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use x509_parser::prelude::*;

/// Seam between the checker and the network. Implementations must be safe
/// to invoke concurrently; the checker drives one call per hostname.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Return the leaf certificate's notAfter timestamp for `hostname`, or
    /// a typed failure. DNS resolution, TCP connect and TLS handshake must
    /// all complete within `timeout`.
    async fn probe(
        &self,
        hostname: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<DateTime<Utc>, ProbeError>;
}

/// A certificate verifier that accepts any certificate, so expired and
/// untrusted certs can still be inspected.
#[derive(Debug)]
struct AcceptAnyCertVerifier;

impl ServerCertVerifier for AcceptAnyCertVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, RustlsError> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, RustlsError> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, RustlsError> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        vec![
            SignatureScheme::RSA_PKCS1_SHA256,
            SignatureScheme::RSA_PKCS1_SHA384,
            SignatureScheme::RSA_PKCS1_SHA512,
            SignatureScheme::ECDSA_NISTP256_SHA256,
            SignatureScheme::ECDSA_NISTP384_SHA384,
            SignatureScheme::ECDSA_NISTP521_SHA512,
            SignatureScheme::RSA_PSS_SHA256,
            SignatureScheme::RSA_PSS_SHA384,
            SignatureScheme::RSA_PSS_SHA512,
            SignatureScheme::ED25519,
            SignatureScheme::ED448,
        ]
    }
}

/// Production prober backed by tokio + rustls.
pub struct TlsProber {
    connector: TlsConnector,
}

impl TlsProber {
    pub fn new() -> Self {
        // Ensure a default crypto provider is installed (needed when
        // multiple providers are available, e.g. reqwest enabling both
        // ring and aws-lc-rs)
        let _ = rustls::crypto::ring::default_provider().install_default();

        let config = ClientConfig::builder()
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(AcceptAnyCertVerifier))
            .with_no_client_auth();

        Self {
            connector: TlsConnector::from(Arc::new(config)),
        }
    }

    async fn probe_inner(&self, hostname: &str, port: u16) -> Result<DateTime<Utc>, ProbeError> {
        let server_name = ServerName::try_from(hostname.to_string())
            .map_err(|_| ProbeError::ConnectionFailed(format!("invalid server name: {hostname}")))?;

        // TcpStream::connect resolves the hostname, so DNS failures surface
        // here as ConnectionFailed
        let addr = format!("{hostname}:{port}");
        let stream = TcpStream::connect(&addr)
            .await
            .map_err(|e| ProbeError::ConnectionFailed(e.to_string()))?;

        let tls_stream = self
            .connector
            .connect(server_name, stream)
            .await
            .map_err(|e| ProbeError::TlsError(e.to_string()))?;

        let (_, connection) = tls_stream.get_ref();
        let certs = connection
            .peer_certificates()
            .ok_or_else(|| ProbeError::MalformedCertificate("no peer certificates".to_string()))?;
        let leaf = certs
            .first()
            .ok_or_else(|| ProbeError::MalformedCertificate("empty certificate chain".to_string()))?;

        leaf_expiry(leaf.as_ref())
    }
}

impl Default for TlsProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Probe for TlsProber {
    async fn probe(
        &self,
        hostname: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<DateTime<Utc>, ProbeError> {
        match tokio::time::timeout(timeout, self.probe_inner(hostname, port)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ProbeError::Timeout),
        }
    }
}

/// Parse a DER-encoded leaf certificate's notAfter field into a UTC
/// timestamp.
pub fn leaf_expiry(der: &[u8]) -> Result<DateTime<Utc>, ProbeError> {
    let (_, cert) = X509Certificate::from_der(der)
        .map_err(|e| ProbeError::MalformedCertificate(format!("{e:?}")))?;

    let timestamp = cert.validity().not_after.timestamp();
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .ok_or_else(|| ProbeError::MalformedCertificate("invalid notAfter timestamp".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_der_is_a_malformed_certificate() {
        let outcome = leaf_expiry(&[0x42; 16]);
        assert!(matches!(outcome, Err(ProbeError::MalformedCertificate(_))));
    }

    #[tokio::test]
    async fn unresolvable_host_fails_with_connection_error() {
        let prober = TlsProber::new();
        let outcome = prober
            .probe("unreachable.invalid", 443, Duration::from_secs(5))
            .await;
        assert!(matches!(
            outcome,
            Err(ProbeError::ConnectionFailed(_)) | Err(ProbeError::Timeout)
        ));
    }
}
