use blog_portal::models::{
    CONTENT_PREVIEW_CHARS, CreatePostRequest, PasswordForm, Post, TITLE_PREVIEW_CHARS, preview,
};

// --- Card Previews ---

#[test]
fn test_short_text_is_untouched() {
    assert_eq!(preview("short", 10), "short");
    assert_eq!(preview("", 10), "");
}

#[test]
fn test_text_at_limit_is_untouched() {
    let exact = "x".repeat(TITLE_PREVIEW_CHARS);
    assert_eq!(preview(&exact, TITLE_PREVIEW_CHARS), exact);
}

#[test]
fn test_long_text_is_cut_with_ellipsis() {
    let post = Post {
        id: 1,
        title: "a".repeat(51),
        content: "b".repeat(150),
    };
    assert_eq!(post.title_preview(), format!("{}...", "a".repeat(50)));
    assert_eq!(
        post.content_preview(),
        format!("{}...", "b".repeat(CONTENT_PREVIEW_CHARS))
    );
}

#[test]
fn test_preview_counts_characters_not_bytes() {
    let title = "é".repeat(60);
    let cut = preview(&title, TITLE_PREVIEW_CHARS);
    assert_eq!(cut.chars().count(), TITLE_PREVIEW_CHARS + 3);
    assert!(cut.starts_with(&"é".repeat(50)));
}

// --- Payloads ---

#[test]
fn test_post_deserializes_from_api_json() {
    let post: Post =
        serde_json::from_str(r#"{"id": 12, "title": "T", "content": "C"}"#).unwrap();
    assert_eq!(
        post,
        Post {
            id: 12,
            title: "T".to_string(),
            content: "C".to_string()
        }
    );
}

#[test]
fn test_create_request_validation() {
    let ok = CreatePostRequest {
        title: "Title".to_string(),
        content: "Body".to_string(),
    };
    assert!(ok.validate().is_ok());

    let blank_title = CreatePostRequest {
        title: "  ".to_string(),
        ..ok.clone()
    };
    assert_eq!(blank_title.validate(), Err("Title is required."));

    let blank_content = CreatePostRequest {
        content: String::new(),
        ..ok
    };
    assert_eq!(blank_content.validate(), Err("Content is required."));
}

#[test]
fn test_create_request_serializes_for_api() {
    let request = CreatePostRequest {
        title: "T".to_string(),
        content: "C".to_string(),
    };
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        serde_json::json!({ "title": "T", "content": "C" })
    );
}

#[test]
fn test_password_form_fields_are_optional() {
    let form: PasswordForm = serde_json::from_str("{}").unwrap();
    assert_eq!(form.password, "");
    assert_eq!(form.next, None);
}
