use duplex_router::{MemoryRequest, Method, Parser, Request, RouteTable, Router, StandardParser};

use std::path::Path;

fn route(
    url: &str,
    specs: &[&str],
    web_root: &str,
    request: &mut MemoryRequest,
) -> Option<String> {
    let router = Router::new(RouteTable::from_lines(specs.iter().copied())).with_web_root(web_root);
    router
        .process(request, url)
        .map(|spec| spec.pattern().to_owned())
}

#[test]
fn router_common() {
    let cases: &[(&str, &[&str], &[(&str, &str)])] = &[
        ("/", &["/ = group()"], &[("controller", "group"), ("action", "index")]),
        ("/index.php", &["/ = group()"], &[("controller", "group"), ("action", "index")]),
        ("/user", &["/user = user()"], &[("controller", "user"), ("action", "index")]),
        ("/user", &["user = user()"], &[("controller", "user"), ("action", "index")]),
        ("/user/", &["/user = user()"], &[("controller", "user"), ("action", "index")]),
        ("/user", &["/user = user:show()"], &[("controller", "user"), ("action", "show")]),
        (
            "/user/123",
            &["/user/:num = user:show( id )"],
            &[("controller", "user"), ("action", "show"), ("id", "123")],
        ),
        (
            "/search/groups/2?q=lorem",
            &[
                "/groups/:word = group( action )",
                "/search/:word/:num = search:searchContent( filter, page )",
            ],
            &[
                ("controller", "search"),
                ("action", "searchContent"),
                ("page", "2"),
                ("filter", "groups"),
            ],
        ),
        (
            "/group/12/administration",
            &[
                "/group/:num.:word = group( id, format, action:show )",
                "/group/:num/:word = group( id, action )",
            ],
            &[("controller", "group"), ("action", "administration"), ("id", "12")],
        ),
        (
            "/help/123/this-is-a%20title",
            &["/help/:num/:any = help( id, title )"],
            &[("action", "index"), ("id", "123"), ("title", "this-is-a title")],
        ),
        (
            "/rss/185.rss",
            &["/rss/:num.rss = rss( blockId, format:rss )"],
            &[("controller", "rss"), ("blockId", "185"), ("format", "rss")],
        ),
        (
            "/newsfeed.rss",
            &["/newsfeed.rss = rss( blockId:185, format:rss )"],
            &[("controller", "rss"), ("blockId", "185"), ("format", "rss")],
        ),
        (
            "/my/groups",
            &["/my/groups = group( currentTab:my )"],
            &[("controller", "group"), ("action", "index"), ("currentTab", "my")],
        ),
        (
            "/user/25/edit",
            &["/user/:num/:word = user( id, action )"],
            &[("controller", "user"), ("action", "edit"), ("id", "25")],
        ),
        (
            "/user/25",
            &["/user/:num = user:show()", "/user/:num = user:delete()"],
            &[("action", "show")],
        ),
        (
            "/group/25/discussions/50",
            &["/group/:num/discussions/:num = group( id, discussionId )"],
            &[("id", "25"), ("action", "index"), ("discussionId", "50")],
        ),
        (
            "/message/181",
            &["/message/:num = usermessage:message( id )"],
            &[("controller", "usermessage"), ("action", "message"), ("id", "181")],
        ),
        (
            "/forum/1/My+First+Topic/newDiscussion",
            &[
                "/forum/:num/:any = forum:showTopic( topicId, topicTitle )",
                "/forum/:num/:any/:word = forum( topicId, topicTitle, action )",
            ],
            &[
                ("controller", "forum"),
                ("action", "newDiscussion"),
                ("topicId", "1"),
                ("topicTitle", "My First Topic"),
            ],
        ),
        (
            "/forum/1/My+First+Topic.htm",
            &["/forum/:num/:any = forum:showTopic( topicId, topicTitle )"],
            &[("action", "showTopic"), ("topicTitle", "My First Topic.htm")],
        ),
    ];

    for &(url, specs, values) in cases {
        let mut request = MemoryRequest::default();
        assert!(route(url, specs, "", &mut request).is_some(), "{}", url);
        for &(name, value) in values {
            assert_eq!(request.get(name), Some(value), "{} {}", url, name);
        }
    }
}

#[test]
fn router_stops_at_end_of_parameter() {
    let specs = &[
        "/my/messages/compose = usermessage:composeMessage()",
        "/my/messages/:word = usermessage( action )",
    ];
    for url in ["/my/messages/composeDraft", "/my/messages/composeDraft?foo=bar"].iter() {
        let mut request = MemoryRequest::default();
        route(url, specs, "", &mut request).unwrap();
        assert_eq!(request.get("controller"), Some("usermessage"));
        assert_eq!(request.get("action"), Some("composeDraft"));
    }
}

#[test]
fn router_method() {
    let specs = &[
        "PUT /user/:num = user:update( id )",
        "DELETE /user/:num = user:delete( id )",
        "/user/:num = user:show( id )",
    ];
    let cases = [
        (Method::PUT, "update"),
        (Method::DELETE, "delete"),
        (Method::GET, "show"),
        (Method::POST, "show"),
    ];
    for (method, action) in cases.iter() {
        let mut request = MemoryRequest::new(method.clone());
        route("/user/123", specs, "", &mut request).unwrap();
        assert_eq!(request.get("action"), Some(*action), "{}", method);
        assert_eq!(request.get("id"), Some("123"));
    }
}

#[test]
fn router_web_root() {
    for web_root in ["/sub/folder/", "/sub/folder"].iter() {
        let mut request = MemoryRequest::default();
        let pattern = route("/sub/folder/user", &["/user = user()"], web_root, &mut request);
        assert_eq!(pattern.as_deref(), Some("/user"));
        assert_eq!(request.get("controller"), Some("user"));
    }

    let mut request = MemoryRequest::default();
    route("/user/1", &["/user/:num = user( id )"], "/foo", &mut request).unwrap();
    assert_eq!(request.get("controller"), Some("user"));
}

#[test]
fn router_extension() {
    let table = RouteTable::from_lines(vec!["/user/:num = user:show( id )"]);
    let router = Router::new(table).with_extension("html");

    let mut request = MemoryRequest::default();
    router.process(&mut request, "/user/123.html").unwrap();
    assert_eq!(request.get("controller"), Some("user"));
    assert_eq!(request.get("action"), Some("show"));
    assert_eq!(request.get("id"), Some("123"));

    assert!(router.find(&Method::GET, "/user/123").is_some());
    assert!(router.find(&Method::GET, "/user/123.htm").is_none());
}

#[test]
fn router_no_match() {
    let router = Router::new(RouteTable::new());
    let mut request = MemoryRequest::default();
    assert!(router.process(&mut request, "").is_none());
    assert!(request.is_empty());

    let router = Router::new(RouteTable::from_lines(vec!["/user/:num = user( id )"]));
    assert!(router.process(&mut request, "/user/abc").is_none());
    assert!(request.is_empty());
}

#[test]
fn router_unbound_placeholders() {
    let table = RouteTable::from_lines(vec!["/user/:num = user:show()", "/user/:num = user:delete()"]);
    assert_eq!(table.len(), 2);

    let router = Router::new(table.clone());
    let mut request = MemoryRequest::default();
    router.process(&mut request, "/user/25").unwrap();
    assert_eq!(request.get("controller"), Some("user"));
    assert_eq!(request.get("action"), Some("show"));
    assert_eq!(request.get("id"), None);

    let rewriter = duplex_router::Rewriter::new(table);
    let url = "server.php?controller=user&action=show";
    assert_eq!(rewriter.rewrite(url, false), url);
}

#[test]
fn router_keeps_request_action() {
    let table = RouteTable::from_lines(vec![
        "/user/:num = user:show( id )",
        "/user/:num/:word = user( id, action )",
    ]);
    let router = Router::new(table);

    let mut request = MemoryRequest::default().with_value("action", "edit");
    router.process(&mut request, "/user/1").unwrap();
    assert_eq!(request.get("action"), Some("edit"));

    let mut request = MemoryRequest::default().with_value("action", "edit");
    router.process(&mut request, "/user/1/delete").unwrap();
    assert_eq!(request.get("action"), Some("delete"));
}

#[test]
fn router_find() {
    let table = RouteTable::from_lines(vec![
        "/group/:num/:any = group:show( id, title, tab:info )",
    ]);
    let router = Router::new(table);

    let m = router.find(&Method::GET, "/group/7/My+Group").unwrap();
    assert_eq!(m.controller(), "group");
    assert_eq!(m.action(), "show");
    assert_eq!(m.specification().pattern(), "/group/:num/:any");
    assert_eq!(
        &m.params()[..],
        &[
            ("id", "7".to_owned()),
            ("title", "My Group".to_owned()),
            ("tab", "info".to_owned())
        ]
    );
    assert_eq!(m.params().parse::<u32>("id"), Some(Ok(7)));
    assert!(m.params().parse::<u32>("title").unwrap().is_err());
    assert_eq!(m.params().get("missing"), None);
}

#[test]
fn router_custom_types() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/resources/routes-types.spec");
    let table = StandardParser::new().parse_file(Path::new(path)).unwrap();
    let router = Router::new(table);

    let mut request = MemoryRequest::default();
    router.process(&mut request, "/user/3abc").unwrap();
    assert_eq!(request.value("id").as_deref(), Some("3abc"));
    assert!(router.find(&Method::GET, "/user/abc").is_none());
}

#[test]
fn router_unknown_type() {
    let table = RouteTable::from_lines(vec![
        "/user/:nope = user( id )",
        "/user/:word = user:fallback( id )",
    ]);
    let router = Router::new(table);
    let m = router.find(&Method::GET, "/user/bob").unwrap();
    assert_eq!(m.action(), "fallback");
}
