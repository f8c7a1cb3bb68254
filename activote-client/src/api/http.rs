use activote_common::{
    Block, Candidate, ErrorBody, LoginRequest, LoginResponse, ProfileForm, SignupReceipt,
    VoteReceipt, VoteRequest, Voter, VotingStatistics,
};
use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, RequestBuilder,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::VotingApi;
use crate::{config::ClientConfig, errors::ClientError, session::SessionContext};

/// reqwest-backed [`VotingApi`].
///
/// Every request carries `Authorization: Bearer <token>` while the shared
/// [`SessionContext`] holds a token.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    config: ClientConfig,
    session: SessionContext,
}

impl HttpApi {
    pub fn new(config: ClientConfig, session: SessionContext) -> Result<Self, ClientError> {
        config.validate()?;
        let client = Client::builder().build()?;
        Ok(Self { client, config, session })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends the request and returns the body text of a 2xx response.
    async fn execute(&self, request: RequestBuilder) -> Result<String, ClientError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "response received");

        if !status.is_success() {
            return Err(ClientError::Status { status: status.as_u16(), body });
        }
        Ok(body)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let body = self.execute(request).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl VotingApi for HttpApi {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ClientError> {
        info!("Logging in as {}", credentials.username);
        let request = self.client.post(self.config.endpoint("voters/login")).json(credentials);
        self.fetch_json(request).await
    }

    async fn signup(&self, form: &ProfileForm) -> Result<SignupReceipt, ClientError> {
        form.validate()?;
        info!("Registering voter {}", form.username);

        let mut multipart = Form::new()
            .text("username", form.username.clone())
            .text("password", form.password.clone())
            .text("cellphone", form.cellphone.clone())
            .text("dateOfBirth", form.date_of_birth.clone());
        if let Some(image) = &form.image {
            let part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
            multipart = multipart.part("userImage", part);
        }

        let request = self.client.post(self.config.endpoint("voters/signup")).multipart(multipart);
        let body = self.execute(request).await?;
        Ok(SignupReceipt::from_body(&body))
    }

    async fn get_voter(&self, voter_id: u64) -> Result<Voter, ClientError> {
        self.session.require()?;
        let request = self.client.get(self.config.endpoint(&format!("voters/{}", voter_id)));
        self.fetch_json(request).await
    }

    async fn get_statistics(&self, voter_id: u64) -> Result<VotingStatistics, ClientError> {
        self.session.require()?;
        debug!("Fetching statistics for voter {}", voter_id);
        let request = self
            .client
            .get(self.config.endpoint("voters/statistics"))
            .query(&[("voterId", voter_id)]);
        self.fetch_json(request).await
    }

    async fn get_candidates(&self) -> Result<Vec<Candidate>, ClientError> {
        let request = self.client.get(self.config.endpoint("candidates"));
        self.fetch_json(request).await
    }

    async fn cast_vote(&self, vote: &VoteRequest) -> Result<VoteReceipt, ClientError> {
        info!("Casting vote: voter={} candidate={}", vote.voter_id, vote.candidate_id);
        let request = self.client.post(self.config.endpoint("voters/vote")).json(vote);
        let body = self.execute(request).await.map_err(|e| {
            warn!("Vote rejected: {}", e);
            e
        })?;
        let message = ErrorBody::parse(&body)
            .message()
            .unwrap_or_else(|| "Vote recorded".to_string());
        Ok(VoteReceipt { message })
    }

    async fn get_blockchain(&self) -> Result<Vec<Block>, ClientError> {
        let request = self.client.get(self.config.endpoint("blockchain"));
        self.fetch_json(request).await
    }
}
