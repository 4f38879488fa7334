use std::{
    error::Error as StdError,
    fs,
    net::{Ipv6Addr, SocketAddr, SocketAddrV6},
    time::Duration,
};

use axum::{Router, routing};
use axum_prometheus::PrometheusMetricLayer;
use axum_server::tls_rustls::RustlsConfig;
use clap::{Arg as ClapArg, Command};
use json5;
use log::{self, error};
use serde::Deserialize;
use tokio;
use tower_http::{cors::CorsLayer, normalize_path::NormalizePathLayer, timeout::TimeoutLayer};

use devreg::{libs, routes};
use devreg_corelib::{logger, server_config};

#[derive(Deserialize)]
struct AppConfig {
    log: logger::Config,
    server: server_config::Config,
    devreg: libs::config::Config,
}

const PROJ_NAME: &'static str = env!("CARGO_BIN_NAME");
const PROJ_VER: &'static str = env!("CARGO_PKG_VERSION");
const HTTP_PORT: u16 = 2080;
const HTTPS_PORT: u16 = 2443;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    const FN_NAME: &'static str = "main";

    let conf = match init_config() {
        Err(e) => {
            let conf = &logger::Config {
                ..Default::default()
            };
            logger::init(PROJ_NAME, &conf);
            error!("[{}] read config error: {}", FN_NAME, e);
            return Ok(());
        }
        Ok(conf) => conf,
    };

    logger::init(PROJ_NAME, &conf.log);

    let state = match routes::new_state("/devreg", &conf.devreg).await {
        Err(e) => {
            error!("[{}] new routes state error: {}", FN_NAME, e);
            return Ok(());
        }
        Ok(state) => state,
    };

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
    let app = Router::new()
        .merge(routes::new_service(&state))
        .route("/version", routing::get(routes::get_version))
        .route(
            "/metrics",
            routing::get(move || async move { metric_handle.render() }),
        )
        .layer(prometheus_layer)
        .layer(CorsLayer::permissive())
        .layer(NormalizePathLayer::trim_trailing_slash())
        .layer(TimeoutLayer::new(Duration::from_secs(60)));

    let ipv6_addr = Ipv6Addr::from([0u8; 16]);
    if let Some(cert_file) = conf.server.cert_file.as_ref() {
        if let Some(key_file) = conf.server.key_file.as_ref() {
            let tls_conf = RustlsConfig::from_pem_file(cert_file, key_file).await?;
            let addr = SocketAddr::V6(SocketAddrV6::new(
                ipv6_addr,
                match conf.server.https_port {
                    None => HTTPS_PORT,
                    Some(port) => port,
                },
                0,
                0,
            ));
            let serv = axum_server::bind_rustls(addr, tls_conf).serve(app.clone().into_make_service());
            tokio::spawn(async move {
                if let Err(e) = serv.await {
                    error!("[{}] HTTPS server error: {}", FN_NAME, e);
                }
            });
        }
    }
    let addr = SocketAddr::V6(SocketAddrV6::new(
        ipv6_addr,
        match conf.server.http_port {
            None => HTTP_PORT,
            Some(port) => port,
        },
        0,
        0,
    ));
    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
}

fn init_config() -> Result<AppConfig, Box<dyn StdError>> {
    let mut args = Command::new(PROJ_NAME).version(PROJ_VER).arg(
        ClapArg::new("file")
            .short('f')
            .long("file")
            .help("config file")
            .num_args(1),
    );
    args = logger::reg_args(args);
    args = server_config::reg_args(args);
    args = libs::config::reg_args(args);
    let args = args.get_matches();

    if let Some(v) = args.get_one::<String>("file") {
        let conf_str = fs::read_to_string(v)?;
        let conf: AppConfig = json5::from_str(conf_str.as_str())?;
        return Ok(AppConfig {
            log: logger::apply_default(&conf.log),
            server: server_config::apply_default(&conf.server),
            devreg: libs::config::apply_default(&conf.devreg),
        });
    }

    Ok(AppConfig {
        log: logger::read_args(&args),
        server: server_config::read_args(&args),
        devreg: libs::config::read_args(&args),
    })
}
