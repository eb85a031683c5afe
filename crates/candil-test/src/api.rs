/// Helper for testing clients of the identity REST surface using wiremock.
///
/// Warning: when using `Mock::expect` ensure the server is not dropped
/// before the test completes.
pub async fn start_identity_mock(mocks: Vec<wiremock::Mock>) -> wiremock::MockServer {
    let server = wiremock::MockServer::start().await;

    for mock in mocks {
        server.register(mock).await;
    }

    server
}
