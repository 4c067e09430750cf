use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use icinga2_provider::{
    configure, ConnectError, ConnectionConfig, Connector, HttpConnector, RawProviderConfig,
};
use rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_rustls::TlsAcceptor;
use url::Url;

const OK_RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\n\
Content-Type: application/json\r\n\
Content-Length: 15\r\n\
Connection: close\r\n\
\r\n\
{\"results\": []}";

/// HTTPS server presenting a freshly generated self-signed certificate.
struct TlsServer {
    port: u16,
    hits: Arc<AtomicUsize>,
    task: tokio::task::JoinHandle<()>,
}

impl Drop for TlsServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl TlsServer {
    fn api_url(&self) -> String {
        format!("https://127.0.0.1:{}/v1", self.port)
    }
}

fn self_signed_acceptor() -> TlsAcceptor {
    let rcgen::CertifiedKey { cert, key_pair } =
        rcgen::generate_simple_self_signed(vec!["127.0.0.1".to_owned(), "localhost".to_owned()])
            .expect("certificate must be generated");
    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key_pair.serialize_der()));

    let config = rustls::ServerConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()
    .expect("protocol versions must be supported")
    .with_no_client_auth()
    .with_single_cert(vec![cert.der().clone()], key)
    .expect("certificate must be accepted");

    TlsAcceptor::from(Arc::new(config))
}

async fn spawn_tls_server() -> TlsServer {
    let acceptor = self_signed_acceptor();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("must bind test listener");
    let port = listener.local_addr().expect("must have local addr").port();
    let hits = Arc::new(AtomicUsize::new(0));

    let served = hits.clone();
    let task = tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            let served = served.clone();
            tokio::spawn(async move {
                // Handshakes rejected by the client never count as hits.
                let Ok(mut tls) = acceptor.accept(stream).await else {
                    return;
                };
                served.fetch_add(1, Ordering::SeqCst);

                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                    match tls.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(read) => request.extend_from_slice(&buf[..read]),
                    }
                }

                let _ = tls.write_all(OK_RESPONSE).await;
                let _ = tls.shutdown().await;
            });
        }
    });

    TlsServer { port, hits, task }
}

fn connection_config(url: &str, insecure_skip_tls_verify: bool) -> ConnectionConfig {
    ConnectionConfig {
        user: "root".to_owned(),
        password: "icinga".to_owned(),
        url: Url::parse(url).expect("test url must parse"),
        insecure_skip_tls_verify,
        retries: 0,
        retry_delay: Duration::ZERO,
    }
}

#[tokio::test]
async fn self_signed_certificate_is_rejected_by_default() {
    let server = spawn_tls_server().await;

    let err = HttpConnector::new()
        .with_timeout(Duration::from_secs(5))
        .connect(connection_config(&server.api_url(), false))
        .await
        .expect_err("untrusted certificate must be rejected");

    assert!(matches!(err, ConnectError::Transport(_)));
    assert_eq!(server.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn skipping_tls_verification_accepts_self_signed_certificate() {
    let server = spawn_tls_server().await;

    let client = HttpConnector::new()
        .with_timeout(Duration::from_secs(5))
        .connect(connection_config(&server.api_url(), true))
        .await
        .expect("connection must succeed without verification");

    assert!(client.insecure_skip_tls_verify());
    assert_eq!(server.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn configure_connects_over_https() {
    let server = spawn_tls_server().await;
    let raw = RawProviderConfig {
        api_url: server.api_url(),
        api_user: "root".to_owned(),
        api_password: "icinga".to_owned(),
        insecure_skip_tls_verify: true,
        retries: 1,
        retry_delay: "10ms".to_owned(),
    };

    let client = configure(&raw, &HttpConnector::new())
        .await
        .expect("configuration must succeed over https");

    assert_eq!(client.base_url().scheme(), "https");
    assert_eq!(client.retry_policy().delay, Duration::from_millis(10));
    assert_eq!(server.hits.load(Ordering::SeqCst), 1);
}
