//! Account integration tests: sign-up, login, logout, membership
//!
//! These tests require a running PostgreSQL instance and DATABASE_URL.
//!
//! Run with: cargo test -p integration-tests --test account_tests

use integration_tests::{
    assert_redirect, assert_status, check_test_env, unique_username, SignUp, TestServer,
    UPGRADE_SECRET,
};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();

    let response = browser.get("/health").await.unwrap();
    assert_status(&response, StatusCode::OK).unwrap();
    assert!(response.text().await.unwrap().contains("healthy"));
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.browser().unwrap().get("/health/ready").await.unwrap();
    assert_status(&response, StatusCode::OK).unwrap();
}

// ============================================================================
// Sign-up Tests
// ============================================================================

#[tokio::test]
async fn test_sign_up_redirects_home_without_logging_in() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    let form = SignUp::unique("newbie");

    let response = browser.sign_up(&form).await.unwrap();
    assert_redirect(&response, "/").unwrap();
    assert_eq!(server.users_named(&form.username).await.unwrap(), 1);

    // Still anonymous
    let home = browser.page("/").await.unwrap();
    assert!(home.contains(r#"action="/log-in""#));
}

#[tokio::test]
async fn test_sign_up_duplicate_username() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    let form = SignUp::unique("dupe");

    assert_redirect(&browser.sign_up(&form).await.unwrap(), "/").unwrap();

    let again = SignUp::new(&form.username, "other").with_names("Echo", "Back");
    let response = browser.sign_up(&again).await.unwrap();
    assert_status(&response, StatusCode::CONFLICT).unwrap();

    let body = response.text().await.unwrap();
    assert!(body.contains("Username already exists"));
    assert!(body.contains(&form.username));
    assert!(body.contains("Echo"));

    assert_eq!(server.users_named(&form.username).await.unwrap(), 1);
}

#[tokio::test]
async fn test_sign_up_password_mismatch() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    let form = SignUp::unique("mismatch").with_confirmation("pw2");

    let response = browser.sign_up(&form).await.unwrap();
    assert_status(&response, StatusCode::BAD_REQUEST).unwrap();

    let body = response.text().await.unwrap();
    assert!(body.contains("Passwords do not match"));
    assert!(body.contains(&form.username));
    assert!(!body.contains("pw2"));

    assert_eq!(server.users_named(&form.username).await.unwrap(), 0);
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_log_in_binds_session() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    let form = SignUp::unique("login").with_names("Lou", "Gin");

    browser.register_and_log_in(&form).await.unwrap();

    let home = browser.page("/").await.unwrap();
    assert!(home.contains("Lou Gin"));
    assert!(home.contains(r#"href="/log-out""#));
    assert!(!home.contains(r#"action="/log-in""#));

    // Pages that need identity are reachable now
    browser.page("/topics/create").await.unwrap();
}

#[tokio::test]
async fn test_log_in_failure_flash_is_generic_and_one_shot() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    let form = SignUp::unique("flash");
    assert_redirect(&browser.sign_up(&form).await.unwrap(), "/").unwrap();

    // Wrong password
    let response = browser.log_in(&form.username, "wrong").await.unwrap();
    assert_redirect(&response, "/").unwrap();
    let wrong_password = browser.page("/").await.unwrap();
    assert!(wrong_password.contains("Incorrect username or password"));

    // Consumed on read
    let again = browser.page("/").await.unwrap();
    assert!(!again.contains("Incorrect username or password"));

    // Unknown user gets the same message
    let response = browser
        .log_in(&unique_username("ghost"), "pw1")
        .await
        .unwrap();
    assert_redirect(&response, "/").unwrap();
    let unknown_user = browser.page("/").await.unwrap();
    assert!(unknown_user.contains("Incorrect username or password"));
}

#[tokio::test]
async fn test_log_in_after_failure_shows_no_stale_flash() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    let form = SignUp::unique("retry");
    assert_redirect(&browser.sign_up(&form).await.unwrap(), "/").unwrap();

    let response = browser.log_in(&form.username, "wrong").await.unwrap();
    assert_redirect(&response, "/").unwrap();
    let response = browser.log_in(&form.username, &form.password).await.unwrap();
    assert_redirect(&response, "/").unwrap();

    let home = browser.page("/").await.unwrap();
    assert!(home.contains(r#"href="/log-out""#));
    assert!(!home.contains("Incorrect username or password"));
}

#[tokio::test]
async fn test_log_in_with_missing_field_fails_like_wrong_password() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();

    let response = browser
        .post_form("/log-in", &[("username", unique_username("nopw"))])
        .await
        .unwrap();
    assert_redirect(&response, "/").unwrap();

    let home = browser.page("/").await.unwrap();
    assert!(home.contains("Incorrect username or password"));
    assert!(home.contains(r#"action="/log-in""#));
}

#[tokio::test]
async fn test_nul_byte_input_is_rejected_cleanly() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    let form = SignUp::new(&format!("{}\0x", unique_username("nul")), "pw1");

    let response = browser.sign_up(&form).await.unwrap();
    assert_status(&response, StatusCode::BAD_REQUEST).unwrap();
    assert!(response
        .text()
        .await
        .unwrap()
        .contains("Text must not contain NUL characters"));

    let response = browser.log_in(&form.username, "pw1").await.unwrap();
    assert_redirect(&response, "/").unwrap();
    let home = browser.page("/").await.unwrap();
    assert!(home.contains("Incorrect username or password"));
}

#[tokio::test]
async fn test_log_out_ends_session() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    browser
        .register_and_log_in(&SignUp::unique("bye"))
        .await
        .unwrap();

    assert_redirect(&browser.get("/log-out").await.unwrap(), "/").unwrap();
    assert_redirect(&browser.get("/topics/create").await.unwrap(), "/").unwrap();
}

#[tokio::test]
async fn test_session_for_deleted_user_is_dropped() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    let form = SignUp::unique("vanish");
    browser.register_and_log_in(&form).await.unwrap();

    sqlx::query("DELETE FROM users WHERE username = $1")
        .bind(&form.username)
        .execute(&server.pool)
        .await
        .unwrap();

    // Proceeds as anonymous
    let home = browser.page("/").await.unwrap();
    assert!(home.contains(r#"action="/log-in""#));
    assert_redirect(&browser.get("/topics/create").await.unwrap(), "/").unwrap();
}

// ============================================================================
// Membership Tests
// ============================================================================

#[tokio::test]
async fn test_upgrade_with_wrong_secret_is_denied() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    let form = SignUp::unique("hopeful");
    browser.register_and_log_in(&form).await.unwrap();

    for guess in ["wrong", "", "let-me-in ", "LET-ME-IN"] {
        let response = browser
            .post_form("/upgrade", &[("passcode", guess)])
            .await
            .unwrap();
        assert_status(&response, StatusCode::FORBIDDEN).unwrap();
        assert!(response.text().await.unwrap().contains("Access denied"));
    }

    assert!(!server.is_member(&form.username).await.unwrap());
}

#[tokio::test]
async fn test_upgrade_with_secret_grants_membership() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    let form = SignUp::unique("member");
    browser.register_and_log_in(&form).await.unwrap();

    let response = browser
        .post_form("/upgrade", &[("passcode", UPGRADE_SECRET)])
        .await
        .unwrap();
    assert_redirect(&response, "/").unwrap();
    assert!(server.is_member(&form.username).await.unwrap());

    // Upgrade form is gone, badge is shown
    let home = browser.page("/").await.unwrap();
    assert!(!home.contains(r#"action="/upgrade""#));
    assert!(home.contains(r#"<span class="badge">member</span>"#));
}

#[tokio::test]
async fn test_anonymous_upgrade_redirects_home() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .browser()
        .unwrap()
        .post_form("/upgrade", &[("passcode", UPGRADE_SECRET)])
        .await
        .unwrap();
    assert_redirect(&response, "/").unwrap();
}
