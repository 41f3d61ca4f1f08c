//! Snowstorm REST client.
//!
//! Wraps the two endpoints the mapper needs: ECL concept search and
//! reference set membership.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Request};
use serde::de::DeserializeOwned;
use snomed_types::{ClinicalDrugId, ConceptPage, EclExpression, RefsetMemberPage};

use crate::types::{ClientConfig, ClientError, ClientResult};

/// Executes constraint queries against a terminology graph.
///
/// Implemented by [`SnowstormClient`]; the resolver only depends on this
/// trait so it can be driven by scripted responses in tests.
#[async_trait]
pub trait ConceptQuery: Send + Sync {
    /// Returns the active concepts matching `expression`, at most `limit` of them.
    ///
    /// The returned page carries the server's total match count.
    async fn query(&self, expression: &EclExpression, limit: u32) -> ClientResult<ConceptPage>;
}

/// HTTP client for a Snowstorm terminology server.
#[derive(Debug, Clone)]
pub struct SnowstormClient {
    http: Client,
    config: ClientConfig,
}

impl SnowstormClient {
    /// Creates a client with the given settings.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    /// Builds the concept search request for `expression`.
    pub fn concept_request(
        &self,
        expression: &EclExpression,
        limit: u32,
    ) -> ClientResult<Request> {
        let request = self
            .http
            .get(self.config.endpoint("concepts"))
            .header(ACCEPT, "application/json")
            .query(&[
                ("activeFilter", "true".to_string()),
                ("ecl", expression.to_string()),
                ("limit", limit.to_string()),
            ])
            .build()?;
        Ok(request)
    }

    /// Builds the request for one page of reference set members.
    pub fn members_request(
        &self,
        refset_id: &str,
        offset: u64,
        limit: u32,
    ) -> ClientResult<Request> {
        let request = self
            .http
            .get(self.config.endpoint("members"))
            .header(ACCEPT, "application/json")
            .query(&[
                ("referenceSet", refset_id.to_string()),
                ("offset", offset.to_string()),
                ("limit", limit.to_string()),
            ])
            .build()?;
        Ok(request)
    }

    /// Fetches every clinical drug referenced by the members of `refset_id`.
    ///
    /// Pages of `page_size` members are requested until the reported total
    /// is reached or the server returns an empty page.
    pub async fn refset_clinical_drugs(
        &self,
        refset_id: &str,
        page_size: u32,
    ) -> ClientResult<Vec<ClinicalDrugId>> {
        let mut clinical_drugs = Vec::new();
        let mut offset: u64 = 0;

        loop {
            let request = self.members_request(refset_id, offset, page_size)?;
            let page: RefsetMemberPage = self.execute(request).await?;

            if page.items.is_empty() {
                break;
            }

            offset += page.items.len() as u64;
            for cd in page.clinical_drugs() {
                tracing::debug!("Clinical drug to map: {}", cd);
                clinical_drugs.push(cd.clone());
            }

            match page.total {
                Some(total) if offset < total => continue,
                _ => break,
            }
        }

        tracing::info!(
            "Fetched {} clinical drugs from reference set {}",
            clinical_drugs.len(),
            refset_id
        );
        Ok(clinical_drugs)
    }

    /// Sends `request` and decodes a successful JSON body.
    async fn execute<T: DeserializeOwned>(&self, request: Request) -> ClientResult<T> {
        let url = request.url().to_string();
        tracing::debug!("GET {}", url);

        let response = self.http.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| ClientError::Decode { url, source })
    }
}

#[async_trait]
impl ConceptQuery for SnowstormClient {
    async fn query(&self, expression: &EclExpression, limit: u32) -> ClientResult<ConceptPage> {
        let request = self.concept_request(expression, limit)?;
        let page: ConceptPage = self.execute(request).await?;
        if page.is_truncated() {
            tracing::warn!(
                "Query matched {} concepts but only {} were returned: {}",
                page.total,
                page.items.len(),
                expression
            );
        }
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snomed_types::ecl::Attribute;
    use std::collections::HashMap;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::{Arc, Mutex};
    use std::thread;

    fn client() -> SnowstormClient {
        SnowstormClient::new(ClientConfig {
            base_url: "http://localhost:8080/snowstorm/snomed-ct/".into(),
            branch: "MAIN/SNOMEDCT-NO/REFSETS".into(),
            ..Default::default()
        })
        .unwrap()
    }

    /// Local HTTP server answering successive connections with canned responses.
    struct CannedServer {
        base_url: String,
        targets: Arc<Mutex<Vec<String>>>,
    }

    impl CannedServer {
        fn start(responses: Vec<(u16, String)>) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            let addr = listener.local_addr().unwrap();
            let targets = Arc::new(Mutex::new(Vec::new()));
            let seen = Arc::clone(&targets);

            thread::spawn(move || {
                for (status, body) in responses {
                    let Ok((mut stream, _)) = listener.accept() else {
                        return;
                    };
                    let mut reader = BufReader::new(stream.try_clone().unwrap());

                    let mut request_line = String::new();
                    reader.read_line(&mut request_line).unwrap();
                    loop {
                        let mut header = String::new();
                        if reader.read_line(&mut header).unwrap() <= 2 {
                            break;
                        }
                    }
                    let target = request_line.split_whitespace().nth(1).unwrap_or("");
                    seen.lock().unwrap().push(target.to_string());

                    write!(
                        stream,
                        "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\n\
                         Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    )
                    .unwrap();
                }
            });

            Self {
                base_url: format!("http://{addr}/snomed-ct/"),
                targets,
            }
        }

        fn client(&self) -> SnowstormClient {
            SnowstormClient::new(ClientConfig {
                base_url: self.base_url.clone(),
                ..Default::default()
            })
            .unwrap()
        }

        /// `offset` parameter of every request received so far.
        fn offsets(&self) -> Vec<String> {
            self.targets
                .lock()
                .unwrap()
                .iter()
                .map(|target| {
                    let url = reqwest::Url::parse(&format!("http://server{target}")).unwrap();
                    url.query_pairs()
                        .find(|(k, _)| k == "offset")
                        .map(|(_, v)| v.into_owned())
                        .unwrap_or_default()
                })
                .collect()
        }
    }

    fn members_page(ids: &[&str], total: Option<u64>) -> (u16, String) {
        let items: Vec<_> = ids
            .iter()
            .map(|id| serde_json::json!({ "referencedComponentId": id }))
            .collect();
        let body = match total {
            Some(total) => serde_json::json!({ "items": items, "total": total }),
            None => serde_json::json!({ "items": items }),
        };
        (200, body.to_string())
    }

    fn ids(clinical_drugs: &[ClinicalDrugId]) -> Vec<&str> {
        clinical_drugs.iter().map(|cd| cd.as_str()).collect()
    }

    fn query_map(request: &Request) -> HashMap<String, String> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_concept_request_encodes_ecl() {
        let expr = EclExpression::concept("322236009")
            .ancestors()
            .refine(vec![Attribute::any(1142139005), Attribute::absent(732943007)]);

        let request = client().concept_request(&expr, 50).unwrap();
        assert_eq!(
            request.url().path(),
            "/snowstorm/snomed-ct/MAIN/SNOMEDCT-NO/REFSETS/concepts"
        );

        let raw_query = request.url().query().unwrap();
        assert!(!raw_query.contains('>'));
        assert!(!raw_query.contains('['));

        let params = query_map(&request);
        assert_eq!(params["activeFilter"], "true");
        assert_eq!(params["limit"], "50");
        assert_eq!(params["ecl"], ">322236009:1142139005=*,[0..0]732943007=*");
    }

    #[test]
    fn test_members_request_parameters() {
        let request = client().members_request("88791000202108", 100, 50).unwrap();
        assert!(request.url().path().ends_with("/members"));

        let params = query_map(&request);
        assert_eq!(params["referenceSet"], "88791000202108");
        assert_eq!(params["offset"], "100");
        assert_eq!(params["limit"], "50");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let client = SnowstormClient::new(ClientConfig {
            base_url: "http://127.0.0.1:1/snomed-ct/".into(),
            ..Default::default()
        })
        .unwrap();

        let err = client
            .query(&EclExpression::concept("1"), 50)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[tokio::test]
    async fn test_members_collected_across_pages() {
        let server = CannedServer::start(vec![
            members_page(&["1", "2"], Some(5)),
            members_page(&["3", "4"], Some(5)),
            members_page(&["5"], Some(5)),
        ]);

        let drugs = server.client().refset_clinical_drugs("1", 2).await.unwrap();

        assert_eq!(ids(&drugs), vec!["1", "2", "3", "4", "5"]);
        assert_eq!(server.offsets(), vec!["0", "2", "4"]);
    }

    #[tokio::test]
    async fn test_members_stop_without_total() {
        let server = CannedServer::start(vec![members_page(&["1", "2"], None)]);

        let drugs = server.client().refset_clinical_drugs("1", 2).await.unwrap();

        assert_eq!(ids(&drugs), vec!["1", "2"]);
        assert_eq!(server.offsets(), vec!["0"]);
    }

    #[tokio::test]
    async fn test_members_stop_on_empty_page() {
        let server = CannedServer::start(vec![
            members_page(&["1", "2"], Some(10)),
            members_page(&[], Some(10)),
        ]);

        let drugs = server.client().refset_clinical_drugs("1", 2).await.unwrap();

        assert_eq!(ids(&drugs), vec!["1", "2"]);
        assert_eq!(server.offsets(), vec!["0", "2"]);
    }

    #[tokio::test]
    async fn test_error_status_is_status_error() {
        let server = CannedServer::start(vec![(503, "{}".to_string())]);

        let err = server
            .client()
            .query(&EclExpression::concept("1"), 50)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Status { status: 503, .. }));
        assert!(!err.is_decode());
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = CannedServer::start(vec![(200, "<html>maintenance</html>".to_string())]);

        let err = server
            .client()
            .query(&EclExpression::concept("1"), 50)
            .await
            .unwrap_err();

        assert!(err.is_decode());
    }

    #[tokio::test]
    async fn test_concept_page_decoded_from_server() {
        let body = r#"{"items":[{"conceptId":"100"}],"total":1}"#;
        let server = CannedServer::start(vec![(200, body.to_string())]);

        let page = server
            .client()
            .query(&EclExpression::concept("1"), 50)
            .await
            .unwrap();

        assert_eq!(page, ConceptPage::from_ids(["100"]));
    }
}
