use icinga2_provider::{configure, HttpConnector, RawProviderConfig};
use reqwest::Method;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RawProviderConfig::from_env()?;

    let client = configure(&config, &HttpConnector::new()).await?;

    let hosts: serde_json::Value = client
        .request(Method::GET, "objects/hosts")
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    for host in hosts["results"].as_array().into_iter().flatten() {
        println!("{}", host["name"]);
    }

    Ok(())
}
