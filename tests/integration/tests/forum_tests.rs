//! Topic and post integration tests
//!
//! These tests require a running PostgreSQL instance and DATABASE_URL.
//!
//! Run with: cargo test -p integration-tests --test forum_tests

use integration_tests::{
    assert_redirect, assert_status, check_test_env, unique_title, unique_username, SignUp,
    TestServer,
};
use reqwest::StatusCode;

const TOPIC_POSTS: &str = "SELECT COUNT(*) FROM posts WHERE topic_id = $1";
const TOPIC_ROWS: &str = "SELECT COUNT(*) FROM topics WHERE id = $1";

// ============================================================================
// Topic Tests
// ============================================================================

#[tokio::test]
async fn test_anonymous_cannot_create_topic() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    let title = unique_title("Anon");

    assert_redirect(&browser.get("/topics/create").await.unwrap(), "/").unwrap();
    assert_redirect(&browser.create_topic(&title, "body").await.unwrap(), "/").unwrap();
    assert!(server.topic_id(&title).await.is_err());
}

#[tokio::test]
async fn test_topic_validation_rerenders_form() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    browser
        .register_and_log_in(&SignUp::unique("writer"))
        .await
        .unwrap();

    let response = browser.create_topic("   ", "kept content").await.unwrap();
    assert_status(&response, StatusCode::BAD_REQUEST).unwrap();
    let body = response.text().await.unwrap();
    assert!(body.contains("Title must be 1-200 characters"));
    assert!(body.contains("kept content"));
}

#[tokio::test]
async fn test_topics_listed_newest_first() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    browser
        .register_and_log_in(&SignUp::unique("lister"))
        .await
        .unwrap();

    let older = unique_title("Older");
    let newer = unique_title("Newer");
    assert_redirect(&browser.create_topic(&older, "a").await.unwrap(), "/").unwrap();
    assert_redirect(&browser.create_topic(&newer, "b").await.unwrap(), "/").unwrap();

    let home = browser.page("/").await.unwrap();
    let pos_older = home.find(&older).unwrap();
    let pos_newer = home.find(&newer).unwrap();
    assert!(pos_newer < pos_older);
}

#[tokio::test]
async fn test_topic_title_is_escaped() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    browser
        .register_and_log_in(&SignUp::unique("xss"))
        .await
        .unwrap();

    let title = format!("<script>alert(1)</script>{}", unique_username(""));
    assert_redirect(&browser.create_topic(&title, "x").await.unwrap(), "/").unwrap();

    let home = browser.page("/").await.unwrap();
    assert!(!home.contains("<script>alert(1)</script>"));
    assert!(home.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn test_delete_topic_removes_posts() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    browser
        .register_and_log_in(&SignUp::unique("cascade"))
        .await
        .unwrap();

    let title = unique_title("Cascade");
    browser.create_topic(&title, "body").await.unwrap();
    let topic_id = server.topic_id(&title).await.unwrap();
    for n in 0..3 {
        browser
            .create_post(topic_id, &format!("reply {n}"))
            .await
            .unwrap();
    }
    assert_eq!(server.count(TOPIC_POSTS, topic_id).await.unwrap(), 3);

    let response = browser.delete_topic(topic_id).await.unwrap();
    assert_redirect(&response, "/").unwrap();

    assert_eq!(server.count(TOPIC_POSTS, topic_id).await.unwrap(), 0);
    assert_eq!(server.count(TOPIC_ROWS, topic_id).await.unwrap(), 0);

    let thread = browser.get(&format!("/chat/{topic_id}")).await.unwrap();
    assert_redirect(&thread, "/").unwrap();

    // Already gone
    let again = browser.delete_topic(topic_id).await.unwrap();
    assert_status(&again, StatusCode::NOT_FOUND).unwrap();
}

#[tokio::test]
async fn test_only_author_or_admin_deletes_topic() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = server.browser().unwrap();
    let stranger = server.browser().unwrap();
    let admin = server.browser().unwrap();

    author
        .register_and_log_in(&SignUp::unique("owner"))
        .await
        .unwrap();
    stranger
        .register_and_log_in(&SignUp::unique("stranger"))
        .await
        .unwrap();
    let admin_form = SignUp::unique("admin");
    admin.register_and_log_in(&admin_form).await.unwrap();
    server.make_admin(&admin_form.username).await.unwrap();

    let title = unique_title("Guarded");
    author.create_topic(&title, "mine").await.unwrap();
    let topic_id = server.topic_id(&title).await.unwrap();

    // No delete button for strangers, and the request is refused
    let home = stranger.page("/").await.unwrap();
    assert!(!home.contains(&format!(r#"action="/topic/delete/{topic_id}""#)));
    let response = stranger.delete_topic(topic_id).await.unwrap();
    assert_status(&response, StatusCode::FORBIDDEN).unwrap();
    assert_eq!(server.count(TOPIC_ROWS, topic_id).await.unwrap(), 1);

    let response = admin.delete_topic(topic_id).await.unwrap();
    assert_redirect(&response, "/").unwrap();
    assert_eq!(server.count(TOPIC_ROWS, topic_id).await.unwrap(), 0);
}

// ============================================================================
// Thread and Post Tests
// ============================================================================

#[tokio::test]
async fn test_unknown_thread_redirects_home() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();

    for path in ["/chat/abc", "/chat/9223372036854775807"] {
        assert_redirect(&browser.get(path).await.unwrap(), "/").unwrap();
    }
}

#[tokio::test]
async fn test_posts_shown_oldest_first() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    browser
        .register_and_log_in(&SignUp::unique("order"))
        .await
        .unwrap();

    let title = unique_title("Order");
    browser.create_topic(&title, "body").await.unwrap();
    let topic_id = server.topic_id(&title).await.unwrap();

    for message in ["first!", "second!", "third!"] {
        let response = browser.create_post(topic_id, message).await.unwrap();
        assert_redirect(&response, &format!("/chat/{topic_id}")).unwrap();
    }

    let thread = browser.page(&format!("/chat/{topic_id}")).await.unwrap();
    let first = thread.find("first!").unwrap();
    let second = thread.find("second!").unwrap();
    let third = thread.find("third!").unwrap();
    assert!(first < second && second < third);
}

#[tokio::test]
async fn test_empty_reply_rerenders_thread() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    browser
        .register_and_log_in(&SignUp::unique("blank"))
        .await
        .unwrap();

    let title = unique_title("Blank");
    browser.create_topic(&title, "body").await.unwrap();
    let topic_id = server.topic_id(&title).await.unwrap();

    let response = browser.create_post(topic_id, "   ").await.unwrap();
    assert_status(&response, StatusCode::BAD_REQUEST).unwrap();
    assert!(response
        .text()
        .await
        .unwrap()
        .contains("Message must be 1-10000 characters"));
    assert_eq!(server.count(TOPIC_POSTS, topic_id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_reply_to_missing_topic_is_not_found() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    browser
        .register_and_log_in(&SignUp::unique("orphan"))
        .await
        .unwrap();

    let response = browser.create_post(i64::MAX, "hello?").await.unwrap();
    assert_status(&response, StatusCode::NOT_FOUND).unwrap();
}

#[tokio::test]
async fn test_delete_post_removes_only_that_row() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    browser
        .register_and_log_in(&SignUp::unique("pruner"))
        .await
        .unwrap();

    let title = unique_title("Prune");
    browser.create_topic(&title, "body").await.unwrap();
    let topic_id = server.topic_id(&title).await.unwrap();
    browser.create_post(topic_id, "keep me").await.unwrap();
    browser.create_post(topic_id, "drop me").await.unwrap();

    let ids = server.post_ids(topic_id).await.unwrap();
    let (keep, drop) = (ids[0], ids[1]);

    let response = browser.delete_post(drop, topic_id).await.unwrap();
    assert_redirect(&response, &format!("/chat/{topic_id}")).unwrap();
    assert_eq!(server.post_ids(topic_id).await.unwrap(), vec![keep]);

    // Already gone: falls back to the form's topic id
    let response = browser.delete_post(drop, topic_id).await.unwrap();
    assert_redirect(&response, &format!("/chat/{topic_id}")).unwrap();
}

#[tokio::test]
async fn test_stranger_cannot_delete_post() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = server.browser().unwrap();
    let stranger = server.browser().unwrap();
    author
        .register_and_log_in(&SignUp::unique("poster"))
        .await
        .unwrap();
    stranger
        .register_and_log_in(&SignUp::unique("meddler"))
        .await
        .unwrap();

    let title = unique_title("Mine");
    author.create_topic(&title, "body").await.unwrap();
    let topic_id = server.topic_id(&title).await.unwrap();
    author.create_post(topic_id, "hands off").await.unwrap();
    let post_id = server.post_ids(topic_id).await.unwrap()[0];

    let response = stranger.delete_post(post_id, topic_id).await.unwrap();
    assert_status(&response, StatusCode::FORBIDDEN).unwrap();
    assert_eq!(server.post_ids(topic_id).await.unwrap(), vec![post_id]);
}

// ============================================================================
// End-to-end
// ============================================================================

#[tokio::test]
async fn test_alice_walkthrough() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    let alice = SignUp::new(&unique_username("alice"), "pw1");

    // Register, then log in
    assert_redirect(&browser.sign_up(&alice).await.unwrap(), "/").unwrap();
    assert_redirect(&browser.log_in(&alice.username, "pw1").await.unwrap(), "/").unwrap();
    let alice_id = server.user_id(&alice.username).await.unwrap();
    assert!(alice_id > 0);

    // Create T1
    let title = unique_title("T1");
    assert_redirect(&browser.create_topic(&title, "hi").await.unwrap(), "/").unwrap();
    let home = browser.page("/").await.unwrap();
    assert!(home.contains(&title));
    let topic_id = server.topic_id(&title).await.unwrap();

    // Empty thread
    let thread = browser.page(&format!("/chat/{topic_id}")).await.unwrap();
    assert!(thread.contains(&title));
    assert!(thread.contains("hi"));
    assert!(thread.contains("No replies yet."));

    // One reply
    let response = browser.create_post(topic_id, "first reply").await.unwrap();
    assert_redirect(&response, &format!("/chat/{topic_id}")).unwrap();
    let thread = browser.page(&format!("/chat/{topic_id}")).await.unwrap();
    assert!(thread.contains("first reply"));
    assert_eq!(thread.matches(r#"class="post""#).count(), 1);
    assert_eq!(server.count(TOPIC_POSTS, topic_id).await.unwrap(), 1);

    // Delete the topic
    assert_redirect(&browser.delete_topic(topic_id).await.unwrap(), "/").unwrap();
    assert_redirect(&browser.get(&format!("/chat/{topic_id}")).await.unwrap(), "/").unwrap();
    assert_eq!(server.count(TOPIC_POSTS, topic_id).await.unwrap(), 0);
}
