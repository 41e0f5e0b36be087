use anyhow::Result;

use crate::formatter::{self, FormattedMessage};
use crate::update::Update;

/// A pure response producer for one matched trigger (or the fallback).
pub type Responder = fn(&Update) -> Result<FormattedMessage>;

/// One registered command: exact trigger string plus its responder.
pub struct CommandEntry {
    pub trigger: &'static str,
    pub responder: Responder,
}

/// Ordered, read-only command registry built once at startup.
/// Lookup is exact-string and case-sensitive; first registered entry wins.
pub struct CommandTable {
    entries: Vec<CommandEntry>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::from_entries(vec![
            CommandEntry {
                trigger: "/start",
                responder: start,
            },
            CommandEntry {
                trigger: "/help",
                responder: help,
            },
            CommandEntry {
                trigger: "/website",
                responder: website,
            },
            CommandEntry {
                trigger: "/campaign_overview",
                responder: campaign_overview,
            },
            CommandEntry {
                trigger: "/ad_creation",
                responder: ad_creation,
            },
            CommandEntry {
                trigger: "/payment_flow",
                responder: payment_flow,
            },
            CommandEntry {
                trigger: "/payout_schedule",
                responder: payout_schedule,
            },
            CommandEntry {
                trigger: "/compliance",
                responder: compliance,
            },
            CommandEntry {
                trigger: "/contact_sales",
                responder: contact_sales,
            },
        ])
    }

    pub fn from_entries(entries: Vec<CommandEntry>) -> Self {
        Self { entries }
    }

    /// Exact-match lookup in registration order.
    pub fn lookup(&self, text: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.trigger == text)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Fallback for text that matches no registered trigger.
pub fn unrecognized(_update: &Update) -> Result<FormattedMessage> {
    Ok(formatter::render(
        "I apologize, I didn't understand that command. Please use one of the \
         predefined commands to navigate our services. Type /help to see a list \
         of available commands.",
    ))
}

/// Best-effort reply sent when dispatch fails partway.
pub fn apology() -> FormattedMessage {
    formatter::render(
        "An unexpected error occurred. Our team has been notified. Please try again later.",
    )
}

// Command copy below is illustrative marketing text, not implemented
// behavior. Each responder composes a bold title with escaped paragraphs so
// the body is always valid MarkdownV2.

fn sections(title: &str, paragraphs: &[&str]) -> String {
    let mut body = formatter::bold(title);
    for paragraph in paragraphs {
        body.push_str("\n\n");
        body.push_str(&formatter::escape(paragraph));
    }
    body
}

fn start(_update: &Update) -> Result<FormattedMessage> {
    Ok(FormattedMessage::from_markup(sections(
        "Welcome to TeleScope – Your Premier Partner in Digital Advertising Contracts.",
        &[
            "We specialize in connecting advertisers with highly engaged Telegram \
             communities through a transparent and secure contractual framework. Our \
             platform leverages advanced AI for precision targeting and ensures \
             compliance with all regulatory standards.",
            "For a comprehensive overview of our services and business model, visit \
             our official landing page with /website. To navigate our features, use \
             the /help command.",
        ],
    )))
}

const COMMAND_SUMMARIES: &[(&str, &str)] = &[
    (
        "/website",
        "Access our official corporate landing page for detailed business information and case studies.",
    ),
    (
        "/campaign_overview",
        "Understand our structured campaign types and the contractual terms associated with each.",
    ),
    (
        "/ad_creation",
        "Learn about our ad content creation process, emphasizing compliance and contractual adherence.",
    ),
    (
        "/payment_flow",
        "Review our secure payment processing protocols and auditable transaction records.",
    ),
    (
        "/payout_schedule",
        "Examine the transparent payout mechanisms for our community partners, based on agreed-upon contracts.",
    ),
    (
        "/compliance",
        "Discover our robust anti-ban and content moderation policies, ensuring legal and ethical advertising.",
    ),
    (
        "/contact_sales",
        "Connect directly with our sales team for partnership inquiries and detailed contract discussions.",
    ),
];

fn help(_update: &Update) -> Result<FormattedMessage> {
    let mut body = formatter::bold("TeleScope: Contract-Oriented Features Overview");
    body.push_str("\n\n");
    body.push_str(&formatter::escape(
        "Our bot serves as the primary interface for managing your advertising \
         agreements and ensuring campaign success.",
    ));
    body.push_str("\n\n");
    body.push_str(&formatter::bold("Key Commands:"));
    for (command, summary) in COMMAND_SUMMARIES {
        body.push('\n');
        body.push_str(&formatter::escape(&format!("•   {command} - {summary}")));
    }
    body.push_str("\n\n");
    body.push_str(&formatter::escape(
        "Our commitment is to provide a reliable, auditable, and high-performance \
         advertising solution.",
    ));
    Ok(FormattedMessage::from_markup(body))
}

fn website(_update: &Update) -> Result<FormattedMessage> {
    let mut body = formatter::bold("Official TeleScope Landing Page:");
    body.push('\n');
    body.push_str(&formatter::escape(
        "Explore our business model, market impact, and technological advantages \
         in detail on our corporate website: ",
    ));
    body.push_str(&formatter::link(
        "TeleScope Official Website",
        "https://telescope-landing-page.vercel.app/",
    ));
    Ok(FormattedMessage::from_markup(body))
}

fn campaign_overview(_update: &Update) -> Result<FormattedMessage> {
    Ok(FormattedMessage::from_markup(sections(
        "Campaign Contractual Overview:",
        &[
            "We offer structured advertising campaigns tailored to specific market \
             segments, each governed by clear contractual terms to ensure mutual \
             benefit and predictable outcomes.",
            "•   Crypto Sphere: Targeted campaigns for blockchain, DeFi, and \
             cryptocurrency projects. Contracts define reach, duration, and \
             compliance with financial regulations.\n\
             •   Gaming Sphere: High-engagement campaigns for game developers, \
             eSports organizations, and gaming communities. Agreements specify \
             audience demographics and performance metrics.\n\
             •   Fitness Sphere: Focused advertising for health, wellness, and \
             nutrition brands. Contracts ensure content aligns with health \
             standards and ethical promotion.",
            "Each campaign is initiated with a formal agreement outlining \
             deliverables, performance indicators, and payment schedules.",
        ],
    )))
}

fn ad_creation(_update: &Update) -> Result<FormattedMessage> {
    Ok(FormattedMessage::from_markup(sections(
        "Ad Content Creation & Compliance:",
        &[
            "Our platform facilitates the creation of compelling ad content while \
             strictly adhering to contractual guidelines and regulatory compliance.",
            "1.  Submission: Advertisers submit their core message and assets.\n\
             2.  AI-Powered Review: Our proprietary AI analyzes content for brand \
             safety, relevance, and compliance with Telegram's terms of service \
             and our internal ethical guidelines.\n\
             3.  Anti-Ban Integration: Ads are processed through our advanced \
             anti-ban system to ensure uninterrupted delivery and protect \
             campaign integrity.\n\
             4.  Approval & Contractual Terms: Upon successful review, the ad is \
             approved, and its distribution terms are formalized within your \
             campaign contract.",
            "This rigorous process safeguards both advertiser reputation and \
             platform integrity.",
        ],
    )))
}

fn payment_flow(_update: &Update) -> Result<FormattedMessage> {
    Ok(FormattedMessage::from_markup(sections(
        "Secure Payment & Auditable Transactions:",
        &[
            "Our payment infrastructure is designed for security, transparency, and \
             ease of auditing, crucial for financial institutions.",
            "•   Multi-Currency Support: We accept various cryptocurrencies (e.g., \
             USDT) and traditional payment methods.\n\
             •   Automated Processing: Payments are processed automatically upon \
             contract initiation, ensuring immediate campaign activation.\n\
             •   Transaction Records: Every transaction is meticulously recorded \
             and accessible for audit purposes, providing a clear financial trail.\n\
             •   Fraud Prevention: Advanced security measures are in place to \
             detect and prevent fraudulent activities.",
            "Our system ensures that all financial interactions are secure, \
             transparent, and fully compliant with industry standards.",
        ],
    )))
}

fn payout_schedule(_update: &Update) -> Result<FormattedMessage> {
    Ok(FormattedMessage::from_markup(sections(
        "Transparent Payouts for Community Partners:",
        &[
            "We ensure timely and transparent remuneration for our community \
             partners (group owners) based on their contractual agreements for \
             hosting ads.",
            "•   Weekly Settlements: Earnings are calculated and settled weekly, \
             ensuring consistent cash flow for our partners.\n\
             •   Performance-Based: Payouts are directly linked to ad delivery and \
             engagement metrics, as defined in each group's contract.\n\
             •   Auditable Reports: Partners receive detailed reports outlining \
             their earnings, allowing for full transparency and reconciliation.\n\
             •   Secure Withdrawals: Funds are securely transferred to designated \
             cryptocurrency wallets (e.g., TRC20 addresses).",
            "Our payout system reflects our commitment to fair and reliable \
             partnerships.",
        ],
    )))
}

fn compliance(_update: &Update) -> Result<FormattedMessage> {
    Ok(FormattedMessage::from_markup(sections(
        "Regulatory Compliance & Platform Integrity:",
        &[
            "Our operational framework is built on a foundation of strict \
             compliance and ethical practices, crucial for long-term \
             sustainability and trust.",
            "•   AI Anti-Ban System: Our proprietary technology proactively adapts \
             to platform changes, ensuring uninterrupted ad delivery without \
             violating terms of service.\n\
             •   Content Moderation: All ad content undergoes rigorous human and \
             AI-driven moderation to prevent the dissemination of inappropriate, \
             misleading, or illegal material.\n\
             •   Data Privacy: We adhere to stringent data protection protocols, \
             safeguarding user and partner information.\n\
             •   Legal Framework: Our contracts and operations are designed to \
             align with international advertising and financial regulations.",
            "We are committed to maintaining a safe, compliant, and high-quality \
             advertising ecosystem.",
        ],
    )))
}

fn contact_sales(_update: &Update) -> Result<FormattedMessage> {
    Ok(FormattedMessage::from_markup(sections(
        "Connect with Our Sales & Partnership Team:",
        &[
            "For detailed discussions on advertising contracts, partnership \
             opportunities, or any specific inquiries, please reach out to our \
             dedicated team:",
            "•   Email: contact@telescope-ads.com\n\
             •   Telegram Support: @telescope_support (for general inquiries)",
            "We look forward to discussing how TeleScope can meet your strategic \
             objectives.",
        ],
    )))
}
