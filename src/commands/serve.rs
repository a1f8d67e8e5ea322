use std::net::SocketAddr;

use crate::config::Config;
use crate::engine::Engine;
use crate::error::{config_error, Error};
use crate::server;

pub async fn run(host: Option<String>, port: Option<u16>) -> Result<(), Error> {
    let config = Config::from_env()?;

    let addr = listen_addr(config.bind_addr, host, port)?;
    let engine = Engine::new(config.backend);

    server::serve(engine, addr).await
}

fn listen_addr(
    configured: SocketAddr,
    host: Option<String>,
    port: Option<u16>,
) -> Result<SocketAddr, Error> {
    let port = port.unwrap_or_else(|| configured.port());

    match host {
        Some(host) => format!("{}:{}", host, port)
            .parse()
            .map_err(|_| config_error(format!("invalid listen address {}:{}", host, port))),
        None => Ok(SocketAddr::new(configured.ip(), port)),
    }
}

#[test]
fn listen_addr_test() {
    let configured: SocketAddr = "127.0.0.1:3001".parse().unwrap();

    assert_eq!(listen_addr(configured, None, None).unwrap(), configured);
    assert_eq!(
        listen_addr(configured, None, Some(8080)).unwrap(),
        "127.0.0.1:8080".parse().unwrap()
    );
    assert_eq!(
        listen_addr(configured, Some("0.0.0.0".into()), None).unwrap(),
        "0.0.0.0:3001".parse().unwrap()
    );
    assert!(listen_addr(configured, Some("not an ip".into()), None).is_err());
}
