//! The posts/comments contract, one scenario per behaviour.

use apiprobe_domain::{Assertion, Endpoint, RequestBody, RequestSpec, Scenario};

/// Recorded body of `GET /posts/`.
pub const ALL_POSTS_FIXTURE: &str = "get_all_posts.json";

/// Recorded body of `GET /posts/1/comments`.
pub const POST_COMMENTS_FIXTURE: &str = "get_all_comments_for_post.json";

const POSTS: &str = "/posts/";

fn post_path(id: u64) -> String {
    format!("{POSTS}{id}")
}

/// Every scenario, in execution order.
#[must_use]
pub fn catalogue(base_url: &str) -> Vec<Scenario> {
    vec![
        get_all_posts(base_url),
        get_one_post(base_url),
        get_comments_for_post(base_url),
        filter_comments_by_post(base_url),
        add_new_post(base_url),
        update_post(base_url),
        update_post_title(base_url),
        delete_post(base_url),
    ]
}

/// `GET /posts/` returns the recorded list.
#[must_use]
pub fn get_all_posts(base_url: &str) -> Scenario {
    Scenario::new(
        "Successfully get all posts",
        RequestSpec::get(&Endpoint::new(base_url, POSTS)),
    )
    .expect(Assertion::status(200))
    .expect(Assertion::fixture(ALL_POSTS_FIXTURE))
}

/// `GET /posts/50` returns post 50.
#[must_use]
pub fn get_one_post(base_url: &str) -> Scenario {
    Scenario::new(
        "Successfully get one post",
        RequestSpec::get(&Endpoint::new(base_url, post_path(50))),
    )
    .expect(Assertion::status(200))
    .expect_all([
        Assertion::field("userId", 5),
        Assertion::field("id", 50),
        Assertion::field(
            "title",
            "repellendus qui recusandae incidunt voluptates tenetur qui omnis exercitationem",
        ),
        Assertion::field(
            "body",
            "error suscipit maxime adipisci consequuntur recusandae\n\
             voluptas eligendi et est et voluptates\n\
             quia distinctio ab amet quaerat molestiae et vitae\n\
             adipisci impedit sequi nesciunt quis consectetur",
        ),
    ])
}

/// `GET /posts/1/comments` returns the recorded comments.
#[must_use]
pub fn get_comments_for_post(base_url: &str) -> Scenario {
    Scenario::new(
        "Successfully get comments for one post",
        RequestSpec::get(&Endpoint::new(base_url, format!("{}/comments", post_path(1)))),
    )
    .expect(Assertion::status(200))
    .expect(Assertion::fixture(POST_COMMENTS_FIXTURE))
}

/// `GET /comments?postId=1` matches the nested route.
#[must_use]
pub fn filter_comments_by_post(base_url: &str) -> Scenario {
    Scenario::new(
        "Successfully filter comments by post",
        RequestSpec::get(&Endpoint::new(base_url, "/comments?postId=1")),
    )
    .expect(Assertion::status(200))
    .expect(Assertion::fixture(POST_COMMENTS_FIXTURE))
}

/// `POST /posts/` echoes the new post with the next id.
#[must_use]
pub fn add_new_post(base_url: &str) -> Scenario {
    let body = RequestBody::json_object()
        .with("userId", 1)
        .with("title", "New created post title")
        .with("body", "New created post body");

    Scenario::new(
        "Add new post",
        RequestSpec::post(&Endpoint::new(base_url, POSTS), body),
    )
    .expect(Assertion::status(201))
    .expect(Assertion::status_line("HTTP/1.1 201 Created"))
    .expect_all([
        Assertion::field("userId", 1),
        Assertion::field("title", "New created post title"),
        Assertion::field("body", "New created post body"),
        Assertion::field("id", 101),
    ])
}

/// `PUT /posts/69` replaces every field.
#[must_use]
pub fn update_post(base_url: &str) -> Scenario {
    let title = "Update post 69 title using put method by User 7";
    let text = "Update post 69 body using put method by User 7";
    let body = RequestBody::json_object()
        .with("userId", 7)
        .with("title", title)
        .with("body", text);

    Scenario::new(
        "Update post using PUT method",
        RequestSpec::put(&Endpoint::new(base_url, post_path(69)), body),
    )
    .expect(Assertion::status(200))
    .expect(Assertion::status_line("HTTP/1.1 200 OK"))
    .expect_all([
        Assertion::field("userId", 7),
        Assertion::field("title", title),
        Assertion::field("body", text),
        Assertion::field("id", 69),
    ])
}

/// `PATCH /posts/96` changes the title and keeps the rest.
#[must_use]
pub fn update_post_title(base_url: &str) -> Scenario {
    let title = "Update only post 96 title using put method by User 7";

    Scenario::new(
        "Update post title only using PATCH method",
        RequestSpec::patch(
            &Endpoint::new(base_url, post_path(96)),
            RequestBody::json_object().with("title", title),
        ),
    )
    .expect(Assertion::status(200))
    .expect(Assertion::status_line("HTTP/1.1 200 OK"))
    .expect_all([
        Assertion::field("userId", 10),
        Assertion::field("id", 96),
        Assertion::field("title", title),
        Assertion::field(
            "body",
            "in non odio excepturi sint eum\n\
             labore voluptates vitae quia qui et\n\
             inventore itaque rerum\n\
             veniam non exercitationem delectus aut",
        ),
    ])
}

/// `DELETE /posts/99` answers with an empty body.
#[must_use]
pub fn delete_post(base_url: &str) -> Scenario {
    Scenario::new(
        "Successfully delete post",
        RequestSpec::delete(&Endpoint::new(base_url, post_path(99))),
    )
    .expect(Assertion::status(200))
    .expect(Assertion::status_line("HTTP/1.1 200 OK"))
    .expect(Assertion::BodyEmpty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiprobe_domain::HttpMethod;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    const BASE: &str = "http://127.0.0.1:3000";

    #[test]
    fn test_catalogue_order_and_names_are_unique() {
        let scenarios = catalogue(BASE);
        assert_eq!(scenarios.len(), 8);

        let mut names: Vec<_> = scenarios.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 8);
    }

    #[test]
    fn test_urls_and_methods() {
        let requests: Vec<_> = catalogue(BASE)
            .into_iter()
            .map(|s| (s.request.method, s.request.url))
            .collect();

        assert_eq!(
            requests,
            vec![
                (HttpMethod::Get, format!("{BASE}/posts/")),
                (HttpMethod::Get, format!("{BASE}/posts/50")),
                (HttpMethod::Get, format!("{BASE}/posts/1/comments")),
                (HttpMethod::Get, format!("{BASE}/comments?postId=1")),
                (HttpMethod::Post, format!("{BASE}/posts/")),
                (HttpMethod::Put, format!("{BASE}/posts/69")),
                (HttpMethod::Patch, format!("{BASE}/posts/96")),
                (HttpMethod::Delete, format!("{BASE}/posts/99")),
            ]
        );
    }

    #[test]
    fn test_fixture_references() {
        let scenario = get_comments_for_post(BASE);
        let fixtures: Vec<_> = scenario.suite.fixtures().collect();
        assert_eq!(fixtures, vec![Path::new(POST_COMMENTS_FIXTURE)]);
    }

    #[test]
    fn test_post_body_keeps_field_order() {
        let scenario = add_new_post(BASE);
        let body = scenario.request.body.to_json_string().unwrap();
        assert_eq!(
            body.as_deref(),
            Some(r#"{"userId":1,"title":"New created post title","body":"New created post body"}"#)
        );
    }

    #[test]
    fn test_multiline_bodies_use_newlines() {
        let scenario = update_post_title(BASE);
        let expected = scenario
            .suite
            .assertions
            .iter()
            .find_map(|a| match a {
                Assertion::JsonPath { path, expected } if path == "body" => expected.clone(),
                _ => None,
            })
            .unwrap();
        assert_eq!(expected.as_str().map(|s| s.lines().count()), Some(4));
        assert!(!expected.as_str().unwrap().contains("  "));
    }
}
