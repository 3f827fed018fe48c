use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::Client;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

static CLIENT: Lazy<Arc<Client>> = Lazy::new(|| {
    let client_res = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build();
    match client_res {
        Ok(client) => Arc::new(client),
        Err(e) => {
            log::error!("[reqwest_client] Unable to build configured client, using default: {:?}", e);
            Arc::new(Client::new())
        }
    }
});

pub fn get_client() -> Arc<Client> {
    Arc::clone(&CLIENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_client_shares_one_instance() {
        let first = get_client();
        let second = get_client();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
