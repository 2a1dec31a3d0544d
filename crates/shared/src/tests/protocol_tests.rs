use super::*;

#[test]
fn consumer_commands_have_no_query_params() {
    let start = CommandDescriptor::start_consumer(ChannelId::Tomcat);
    assert_eq!(start.endpoint_path(), "/dispatcher/tomcat-consumer/start");
    assert_eq!(start.query_params(), None);

    let stop = CommandDescriptor::stop_consumer(ChannelId::Jetty);
    assert_eq!(stop.endpoint_path(), "/dispatcher/jetty-consumer/stop");
    assert_eq!(stop.role(), Role::Consumer);
    assert_eq!(stop.action(), CommandAction::Stop);
}

#[test]
fn send_encodes_space_as_percent_twenty() {
    let send = CommandDescriptor::send_to_producer(ChannelId::Tomcat, "hello world");
    assert_eq!(send.endpoint_path(), "/dispatcher/tomcat-producer/send");
    assert_eq!(send.query_params().as_deref(), Some("msg=hello%20world"));
}

#[test]
fn empty_send_still_carries_msg_key() {
    let send = CommandDescriptor::send_to_producer(ChannelId::Jetty, "");
    assert_eq!(send.query_params().as_deref(), Some("msg="));
    assert_eq!(send.payload(), Some(""));
}

#[test]
fn component_encoding_escapes_query_delimiters() {
    assert_eq!(encode_uri_component("a&b=c+d"), "a%26b%3Dc%2Bd");
    assert_eq!(encode_uri_component("50%/x?y#z"), "50%25%2Fx%3Fy%23z");
}

#[test]
fn component_encoding_keeps_unreserved_marks() {
    assert_eq!(encode_uri_component("A-z_0.9!~*'()"), "A-z_0.9!~*'()");
}

#[test]
fn component_encoding_is_utf8_aware() {
    assert_eq!(encode_uri_component("héllo"), "h%C3%A9llo");
    assert_eq!(encode_uri_component("✓"), "%E2%9C%93");
}

#[test]
fn query_paths_and_notices() {
    let messages = QueryDescriptor::consumer_messages(ChannelId::Tomcat);
    assert_eq!(messages.endpoint_path(), "/dispatcher/tomcat-consumer/messages");
    assert_eq!(
        messages.failure_notice(),
        "Failed to fetch tomcat consumer messages."
    );

    let stats = QueryDescriptor::producer_stats(ChannelId::Jetty);
    assert_eq!(stats.endpoint_path(), "/dispatcher/jetty-producer/stats");
    assert_eq!(stats.failure_notice(), "Failed to fetch jetty producer stats.");
}
