/// Page addresses and CSS selectors for the target platform's markup.
///
/// The site can change its markup independently of this program, so every
/// selector the workflows touch lives here rather than inline in the loops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    /// Home page opened during profile confirmation.
    pub home_url: String,
    /// Feed page listing every subscribed channel.
    pub subscriptions_url: String,
    /// Anchor element of one subscription entry on the feed page.
    pub subscription_entry: String,
    /// Attribute of the entry anchor that holds the channel link.
    pub entry_link_attr: String,
    /// Clickable subscribe control on a channel page.
    pub subscribe_button: String,
    /// Text node inside the control whose label decides the action.
    pub subscribe_label: String,
    /// Label text meaning the channel is not yet subscribed.
    pub label_unsubscribed: String,
    /// Label text meaning the channel is already subscribed.
    pub label_subscribed: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            home_url: "https://youtube.com/".into(),
            subscriptions_url: "https://www.youtube.com/feed/channels".into(),
            subscription_entry: "a#main-link".into(),
            entry_link_attr: "href".into(),
            subscribe_button: "yt-subscribe-button-view-model".into(),
            subscribe_label:
                "yt-subscribe-button-view-model .yt-spec-button-shape-next__button-text-content"
                    .into(),
            label_unsubscribed: "Subscribe".into(),
            label_subscribed: "Subscribed".into(),
        }
    }
}
