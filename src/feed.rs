//! RSS 2.0 feed generation.
//!
//! One `<item>` per published post, assembled with the `rss` crate's
//! builders. The feed consumes the same loaded post records as the page
//! emitters, so drafts never reach it and ordering matches the index.

use crate::config::SiteConfig;
use crate::types::Post;
use rss::{Channel, ChannelBuilder, GuidBuilder, ItemBuilder};

/// Generate the feed XML for the loaded posts.
pub fn feed_xml(site: &SiteConfig, posts: &[Post]) -> String {
    let items: Vec<rss::Item> = posts.iter().map(|post| post_to_item(site, post)).collect();

    let channel: Channel = ChannelBuilder::default()
        .title(site.title.clone())
        .link(site.page_url(""))
        .description(site.description.clone())
        .language(site.language.clone())
        .generator("marginalia".to_string())
        .items(items)
        .build();

    channel.to_string()
}

/// One feed item per post: title, landing-page link doubling as permalink
/// GUID, pubDate when the declared date parses, description when present.
fn post_to_item(site: &SiteConfig, post: &Post) -> rss::Item {
    let link = site.page_url(&format!("posts/{}/", post.slug));

    ItemBuilder::default()
        .title(post.title.clone())
        .link(link.clone())
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description(post.description.clone())
        .pub_date(post.pub_date())
        .build()
}
