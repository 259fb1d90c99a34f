use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use property_browser::carousel::Carousel;
use property_browser::chatbot::ChatSession;
use property_browser::contact::{ContactController, ContactForm, ContactOutcome};
use property_browser::listing::{DetailController, DetailView, FilterCriteria, FilterForm, ListingController, ListingView};
use property_browser::models::{Property, Speaker};
use property_browser::store::FileStore;
use property_browser::theme::Theme;
use property_browser::{Config, HttpClient};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Browse property listings, talk to the support chatbot, send an enquiry
#[derive(Parser, Debug)]
#[command(name = "property-browser", version, about, long_about = None)]
struct Cli {
    /// Listings service base url (overrides PROPERTY_API_BASE_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Local state file for the chat session and theme
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List one page of properties
    List(ListArgs),

    /// Show a single property
    Show {
        id: String,

        /// Site origin used for share links
        #[arg(long, default_value = "http://localhost:3000")]
        origin: String,
    },

    /// Step through the featured properties carousel
    Featured {
        /// Viewport width in pixels
        #[arg(long, default_value_t = 1280)]
        width: u32,

        /// Press "next" this many times (negative goes back)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        steps: i32,
    },

    /// Talk to the support chatbot
    Chat {
        /// Messages to send, in order
        messages: Vec<String>,

        /// Print the restored transcript
        #[arg(long)]
        history: bool,

        /// Clear the conversation but keep the session
        #[arg(long)]
        clear: bool,

        /// Forget the session entirely
        #[arg(long)]
        reset: bool,
    },

    /// Send an enquiry through the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        message: String,
        /// Property the enquiry is about
        #[arg(long)]
        property: Option<String>,
    },

    /// Show or toggle the color theme preference
    Theme {
        #[arg(long)]
        toggle: bool,
    },
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Raw query string, e.g. "category=Villa&page=2"; flags below override it
    #[arg(long)]
    query: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    min_price: Option<String>,
    #[arg(long)]
    max_price: Option<String>,
    #[arg(long)]
    bedrooms: Option<String>,
    #[arg(long)]
    bathrooms: Option<String>,
    /// Repeat to require several amenities
    #[arg(long = "amenity")]
    amenities: Vec<String>,
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    limit: Option<u32>,
}

impl ListArgs {
    /// Fill the filter sidebar the way a user would, then apply it.
    fn criteria(&self, page_size: u32) -> FilterCriteria {
        let seed = self
            .query
            .as_deref()
            .map(FilterCriteria::parse)
            .unwrap_or_else(|| FilterCriteria {
                limit: page_size,
                ..FilterCriteria::default()
            });
        let mut form = FilterForm::from_criteria(&seed);

        let overrides = [
            (&self.category, &mut form.category),
            (&self.location, &mut form.location),
            (&self.min_price, &mut form.min_price),
            (&self.max_price, &mut form.max_price),
            (&self.bedrooms, &mut form.bedrooms),
            (&self.bathrooms, &mut form.bathrooms),
        ];
        for (flag, field) in overrides {
            if let Some(value) = flag {
                *field = value.clone();
            }
        }
        for amenity in &self.amenities {
            if !form.has_amenity(amenity) {
                form.toggle_amenity(amenity);
            }
        }

        let applied = form.apply();
        FilterCriteria {
            page: self.page.unwrap_or(seed.page),
            limit: self.limit.unwrap_or(applied.limit),
            ..applied
        }
        .normalize()
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_property(n: usize, property: &Property) {
    println!("{}. {} ({})", n, property.title, property.formatted_price());
    println!("   {} · {} · {}", property.category, property.location, property.area);
    println!("   {} bed, {} bath", property.bedrooms, property.bathrooms);
    if !property.amenities.is_empty() {
        println!("   Amenities: {}", property.amenities.join(", "));
    }
    println!("   {}", property.href());
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::from_env()?;
    if let Some(raw) = &cli.api_url {
        config.api_base_url = Url::parse(raw).with_context(|| format!("--api-url is not a valid url: {}", raw))?;
    }
    if let Some(path) = cli.state_file {
        config.state_file = path;
    }

    let client = Arc::new(HttpClient::new(&config)?);
    info!("🏠 Property Browser ({})", client.base_url());

    match cli.command {
        Command::List(args) => {
            let criteria = args.criteria(config.page_size);
            let view = ListingController::new(&*client).load(&criteria).await;
            match view {
                ListingView::Loaded(page) => {
                    println!("{}\n", page.summary());
                    for (i, property) in page.properties.iter().enumerate() {
                        print_property(i + 1, property);
                        println!();
                    }
                    if page.pagination.is_visible() {
                        println!("Page {} of {}", page.current_page, page.total_pages);
                        if let Some(prev) = &page.pagination.previous {
                            println!("  Previous: {}", prev);
                        }
                        for link in &page.pagination.links {
                            let marker = if link.current { "*" } else { " " };
                            println!(" {}{:>3}  {}", marker, link.number, link.href);
                        }
                        if let Some(next) = &page.pagination.next {
                            println!("  Next: {}", next);
                        }
                    }
                }
                other => {
                    println!("{}", other.title());
                    if let Some((label, href)) = other.remedy() {
                        println!("{}: {}", label, href);
                    }
                }
            }
        }

        Command::Show { id, origin } => {
            let view = DetailController::new(&*client, origin).load(&id).await;
            let DetailView::Found(view) = view else {
                anyhow::bail!("Property not found: {}", id);
            };
            let property = &view.property;
            println!("{}", property.title);
            println!("{} · {} · listed {}", view.price, property.location, view.listed_on);
            println!("{} · {} bed · {} bath · {}", property.category, property.bedrooms, property.bathrooms, property.area);
            println!();
            println!("{}", property.description);
            if !property.amenities.is_empty() {
                println!();
                println!("Amenities: {}", property.amenities.join(", "));
            }
            println!();
            for image in view.gallery.thumbnails() {
                println!("  🖼  {}", image);
            }
            if let Some(video) = view.gallery.video() {
                println!("  🎬 {}", video);
            }
            println!();
            println!("Share: {}", view.share.property_url);
            for link in &view.share.links {
                println!("  {}: {}", link.name, link.url);
            }
        }

        Command::Featured { width, steps } => {
            let featured = ListingController::new(&*client).featured().await;
            let mut carousel = Carousel::new(featured, width);
            for _ in 0..steps.unsigned_abs() {
                if steps > 0 {
                    carousel.next();
                } else {
                    carousel.prev();
                }
            }
            if carousel.is_empty() {
                println!("No featured properties");
                return Ok(());
            }
            println!(
                "Featured properties: window {} of {} ({} per view)\n",
                carousel.index() + 1,
                carousel.total_windows(),
                carousel.window_size()
            );
            for (i, property) in carousel.window().iter().enumerate() {
                print_property(carousel.index() * carousel.window_size() + i + 1, property);
                println!();
            }
        }

        Command::Chat {
            messages,
            history,
            clear,
            reset,
        } => {
            let store = Arc::new(FileStore::open(&config.state_file)?);
            let mut chat = ChatSession::mount(client.clone(), store).await;

            if reset {
                chat.reset_chat().await;
                println!("Chat session reset");
            } else if clear && !chat.clear_chat().await {
                println!("Could not clear the chat, try again later");
            }

            let already = chat.transcript().len();
            if messages.is_empty() && !history && !clear && !reset {
                chat.open().await;
            }
            for message in &messages {
                chat.send_message(message).await;
            }

            let shown = if history { 0 } else { already };
            for line in &chat.transcript()[shown..] {
                let who = match line.speaker {
                    Speaker::User => "you",
                    Speaker::Bot => "bot",
                };
                println!("{:>4}: {}", who, line.text);
            }
        }

        Command::Contact {
            name,
            phone,
            message,
            property,
        } => {
            let mut form = ContactForm {
                property_name: property,
                name,
                phone,
                message,
            };
            match ContactController::new(&*client).submit(&mut form).await {
                ContactOutcome::Sent { name } => {
                    println!("✅ Thank you, {}! We'll get back to you as soon as possible.", name);
                }
                ContactOutcome::Invalid(errors) => {
                    for error in &errors.0 {
                        eprintln!("{:?}: {}", error.field, error.message);
                    }
                    anyhow::bail!("Contact form is invalid");
                }
                ContactOutcome::Failed => anyhow::bail!("Error sending message, please try again later"),
            }
        }

        Command::Theme { toggle } => {
            let store = FileStore::open(&config.state_file)?;
            let theme = if toggle {
                Theme::toggle(&store)?
            } else {
                Theme::load(&store)
            };
            println!("{}", theme);
        }
    }

    Ok(())
}
