//! Terminal front-end for the PawsConnect client.
//!
//! Each subcommand plays the role of one route: it restores the stored
//! session, applies the route guard, drives the matching page or form model,
//! and prints what the page would show.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pawsconnect::config::ConfigError;
use pawsconnect::forms::account::{LoginForm, PasswordForm, ProfileForm, RegisterForm, request_password_reset};
use pawsconnect::forms::blog_create::BlogCreateForm;
use pawsconnect::forms::comment::CommentSection;
use pawsconnect::forms::item::ItemForm;
use pawsconnect::forms::manual_donation::ManualDonationForm;
use pawsconnect::forms::mock_payment::MockPaymentForm;
use pawsconnect::forms::payment_modal::{PaymentMethod, PaymentModal};
use pawsconnect::forms::post_update::PostUpdateForm;
use pawsconnect::forms::post_wizard::PostWizard;
use pawsconnect::forms::store::{ProductCreateForm, StoreCreateForm};
use pawsconnect::forms::volunteer::VolunteerDonationForm;
use pawsconnect::net::multipart::Attachment;
use pawsconnect::net::types::{
    DonationStatus, ItemKind, OrderStatus, PetSize, PostType, ProductCategory, ReviewAction, User, VolunteerItemType,
};
use pawsconnect::pages::admin::{AdminPage, AdminTab};
use pawsconnect::pages::badges::{self, CATALOG};
use pawsconnect::pages::blog::{BlogPage, excerpt};
use pawsconnect::pages::dashboard::DashboardPage;
use pawsconnect::pages::donations::{DonationScope, DonationSort, DonationsPage, status_tone};
use pawsconnect::pages::guard::{self, GuardDecision, RouteAccess};
use pawsconnect::pages::items::ItemsPage;
use pawsconnect::pages::manual_payments::ManualPaymentsPage;
use pawsconnect::pages::orders::OrdersPage;
use pawsconnect::pages::pet_detail::{DonationOffer, LOGIN_TO_DONATE, PetDetailPage};
use pawsconnect::pages::pets::{PetFilters, PetsPage, funding_progress};
use pawsconnect::pages::store::{StorePage, stock_status};
use pawsconnect::storage::StorageError;
use pawsconnect::util::format::{DateStyle, format_date, format_price};
use pawsconnect::util::media::media_url;
use pawsconnect::{ApiClient, ApiError, AuthContext, ClientConfig, FileStore};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("api error: {0}")]
    Api(#[from] ApiError),
    #[error("failed to read {}: {source}", .path.display())]
    Attachment { path: PathBuf, source: std::io::Error },
    #[error("not signed in; run `pawsconnect login` first")]
    NotSignedIn,
    #[error("admin privileges required")]
    AccessDenied,
    #[error("no pending payment; start one with `pawsconnect donate`")]
    NoPendingPayment,
    #[error("{0}")]
    Rejected(String),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<String> for CliError {
    fn from(message: String) -> Self {
        Self::Rejected(message)
    }
}

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Parser, Debug)]
#[command(name = "pawsconnect", about = "PawsConnect pet adoption client")]
struct Cli {
    #[arg(long, env = "PAWS_API_BASE_URL")]
    api_base_url: Option<String>,

    #[arg(long, env = "PAWS_STORAGE_PATH")]
    storage_path: Option<PathBuf>,

    /// Print raw JSON instead of summaries.
    #[arg(long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PAWS_PASSWORD")]
        password: String,
    },
    Logout,
    Register(RegisterArgs),
    Whoami,
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    Profile(ProfileCommand),
    Pets(PetsCommand),
    PostPet(PostPetArgs),
    /// Start an online donation; finish it with `pay`.
    Donate {
        post_id: String,
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "")]
        message: String,
    },
    /// Complete the pending donation with simulated card details.
    Pay(PayArgs),
    DonateManual {
        post_id: String,
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "")]
        message: String,
        #[arg(long)]
        receipt: Option<PathBuf>,
    },
    Donations {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        status: Option<DonationStatus>,
        #[arg(long, default_value = "recent")]
        sort: DonationSort,
        /// Only your own donations.
        #[arg(long, conflicts_with = "post")]
        mine: bool,
        /// Only verified donations toward this post.
        #[arg(long)]
        post: Option<String>,
    },
    Store(StoreCommand),
    Items(ItemsCommand),
    Blog(BlogCommand),
    Badges,
    Dashboard,
    Admin(AdminCommand),
    Volunteer(VolunteerArgs),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "PAWS_PASSWORD")]
    password: String,
    #[arg(long)]
    confirm_password: Option<String>,
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    #[arg(long)]
    nid_photo: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileSubcommand {
    Update {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
    Photo {
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
struct PetsCommand {
    #[command(subcommand)]
    command: PetsSubcommand,
}

#[derive(Subcommand, Debug)]
enum PetsSubcommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long = "type")]
        post_type: Option<PostType>,
        #[arg(long)]
        pet_type: Option<String>,
        #[arg(long)]
        size: Option<PetSize>,
        /// Client-side tab: adoption or donation.
        #[arg(long)]
        tab: Option<PostType>,
    },
    Show {
        post_id: String,
    },
    Bookmark {
        post_id: String,
    },
    Comment {
        post_id: String,
        #[arg(long)]
        text: String,
    },
    /// Delete a listing you own (staff may delete any).
    Delete {
        post_id: String,
    },
    /// Post a progress update on a listing you own.
    Update {
        post_id: String,
        #[arg(long, default_value = "")]
        text: String,
        #[arg(long = "photo")]
        photos: Vec<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct PostPetArgs {
    #[arg(long = "type")]
    post_type: PostType,
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    pet_type: String,
    #[arg(long)]
    species: String,
    #[arg(long)]
    age: String,
    #[arg(long)]
    size: PetSize,
    #[arg(long, default_value = "")]
    goal: String,
    #[arg(long = "photo")]
    photos: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct PayArgs {
    #[arg(long)]
    card_number: String,
    #[arg(long)]
    expiry: String,
    #[arg(long)]
    cvv: String,
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct StoreCommand {
    #[command(subcommand)]
    command: StoreSubcommand,
}

#[derive(Subcommand, Debug)]
enum StoreSubcommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        category: Option<ProductCategory>,
        #[arg(long)]
        store: Option<String>,
    },
    Buy {
        product_id: String,
        #[arg(long, value_enum, default_value = "card")]
        method: CheckoutMethod,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "")]
        phone: String,
    },
    CreateStore {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Your order history.
    Orders {
        #[arg(long)]
        status: Option<OrderStatus>,
    },
    AddProduct {
        #[arg(long)]
        store: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        category: ProductCategory,
        #[arg(long)]
        price: String,
        #[arg(long)]
        stock: String,
    },
}

#[derive(Args, Debug)]
struct ItemsCommand {
    #[command(subcommand)]
    command: ItemsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ItemsSubcommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Offer food or toys toward a pet listing.
    Give {
        post_id: String,
        #[arg(long = "type")]
        item_type: ItemKind,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "1")]
        quantity: String,
    },
    Claim {
        item_id: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CheckoutMethod {
    Card,
    Mobile,
    Bank,
}

impl From<CheckoutMethod> for PaymentMethod {
    fn from(method: CheckoutMethod) -> Self {
        match method {
            CheckoutMethod::Card => Self::Card,
            CheckoutMethod::Mobile => Self::Mobile,
            CheckoutMethod::Bank => Self::Bank,
        }
    }
}

#[derive(Args, Debug)]
struct BlogCommand {
    #[command(subcommand)]
    command: BlogSubcommand,
}

#[derive(Subcommand, Debug)]
enum BlogSubcommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        topic: Option<String>,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long, default_value = "")]
        tags: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
enum AdminSubcommand {
    List {
        #[arg(default_value = "users")]
        tab: AdminTab,
        #[arg(long, default_value = "")]
        search: String,
    },
    DeleteUser {
        user_id: String,
    },
    ToggleUser {
        user_id: String,
    },
    DeletePost {
        post_id: String,
    },
    DeleteComment {
        comment_id: String,
    },
    Pending,
    /// Move an order to a new status.
    OrderStatus {
        order_id: String,
        status: OrderStatus,
    },
    Review {
        donation_id: String,
        #[arg(value_enum)]
        verdict: Verdict,
        #[arg(long, default_value = "")]
        notes: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Verdict {
    Approve,
    Reject,
}

impl From<Verdict> for ReviewAction {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Approve => Self::Approve,
            Verdict::Reject => Self::Reject,
        }
    }
}

#[derive(Args, Debug)]
struct VolunteerArgs {
    #[arg(long)]
    item_type: VolunteerItemType,
    #[arg(long)]
    description: String,
    #[arg(long, default_value = "")]
    quantity: String,
    #[arg(long, default_value = "")]
    estimated_value: String,
    #[arg(long)]
    pickup: String,
    #[arg(long)]
    contact: String,
    #[arg(long, default_value = "")]
    available_times: String,
    #[arg(long, default_value = "")]
    instructions: String,
}

// =============================================================================
// ENTRY
// =============================================================================

#[tokio::main]
async fn main() -> Result<(), CliError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("warning: failed to load .env: {e}");
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pawsconnect=info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.api_base_url {
        config = config.with_api_base_url(url)?;
    }
    if let Some(path) = &cli.storage_path {
        config.storage_path.clone_from(path);
    }

    let store = Arc::new(FileStore::open(&config.storage_path)?);
    let api = ApiClient::new(&config, store)?;
    let mut auth = AuthContext::new(api);
    auth.init().await;

    let ctx = Ctx { json: cli.json };
    run(&ctx, &mut auth, cli.command).await
}

struct Ctx {
    json: bool,
}

async fn run(ctx: &Ctx, auth: &mut AuthContext, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => {
            let mut form = LoginForm { email, password, ..LoginForm::default() };
            let user = form.submit(auth).await?;
            println!("Signed in as {}", user.display_name());
            Ok(())
        }
        Command::Logout => {
            auth.logout().await;
            println!("Signed out");
            Ok(())
        }
        Command::Register(args) => run_register(auth, args).await,
        Command::Whoami => {
            let user = require(auth, RouteAccess::Protected)?;
            emit(ctx, &user, |user| {
                println!("{} <{}>{}", user.display_name(), user.email, if user.is_staff { " [staff]" } else { "" });
            })
        }
        Command::ForgotPassword { email } => {
            request_password_reset(&email)?;
            Ok(())
        }
        Command::Profile(profile) => run_profile(auth, profile.command).await,
        Command::Pets(pets) => run_pets(ctx, auth, pets.command).await,
        Command::PostPet(args) => run_post_pet(auth, args).await,
        Command::Donate { post_id, amount, message } => run_donate(auth, &post_id, amount, message).await,
        Command::Pay(args) => run_pay(auth, args).await,
        Command::DonateManual { post_id, amount, message, receipt } => {
            require(auth, RouteAccess::Protected)?;
            let mut form = ManualDonationForm { amount, message, ..ManualDonationForm::new(post_id) };
            if let Some(path) = receipt {
                form.select_receipt(read_attachment(&path)?)?;
            }
            let donation = form.submit(auth.api()).await?;
            println!("{} (status: {})", form.success.unwrap_or_default(), donation.status);
            Ok(())
        }
        Command::Donations { search, status, sort, mine, post } => {
            let scope = match (mine, post) {
                (true, _) => {
                    require(auth, RouteAccess::Protected)?;
                    DonationScope::Mine
                }
                (false, Some(post_id)) => DonationScope::Post(post_id),
                (false, None) => DonationScope::All,
            };
            let mut page = DonationsPage::scoped(scope);
            page.mount(auth.api()).await;
            page.search = search;
            page.status = status;
            page.sort = sort;
            emit(ctx, &page.visible(), |visible| {
                for donation in visible {
                    println!(
                        "{}  {:>10}  {:<8} [{}]  {} -> {}",
                        format_date(&donation.created_at, DateStyle::ShortWithTime),
                        format_price(donation.amount),
                        donation.status.as_str(),
                        status_tone(donation.status),
                        donation.donor.display_name(),
                        donation.post.title,
                    );
                }
                println!("{}  Total: {}", page.summary(), format_price(page.total_amount()));
            })
        }
        Command::Store(store) => run_store(ctx, auth, store.command).await,
        Command::Items(items) => run_items(ctx, auth, items.command).await,
        Command::Blog(blog) => run_blog(ctx, auth, blog.command).await,
        Command::Badges => {
            let summary = badges::summarize(CATALOG);
            println!(
                "{} of {} badges earned ({}%), {} rare",
                summary.earned, summary.total, summary.completion_percent, summary.rare
            );
            for category in CATALOG {
                println!("\n{}: {}", category.name, category.description);
                for badge in category.badges {
                    let mark = if badge.earned { "x" } else { " " };
                    println!(
                        "  [{mark}] {} {} ({}) {} {:.0}%",
                        badge.icon,
                        badge.name,
                        badge.rarity,
                        badge.progress_label(),
                        badge.progress_percent()
                    );
                }
            }
            Ok(())
        }
        Command::Dashboard => {
            let page = DashboardPage::open(auth).await.map_err(denied)?;
            let stats = page.stats();
            println!("Pets: {}  Donations: {}  Badges: {}", stats.pets, stats.donations, stats.badges);
            for pet in &page.recent_pets {
                println!("  {}  {}  {}", pet.id, pet.title, pet.post_type);
            }
            Ok(())
        }
        Command::Admin(admin) => run_admin(ctx, auth, admin.command).await,
        Command::Volunteer(args) => {
            require(auth, RouteAccess::Protected)?;
            let mut form = VolunteerDonationForm {
                item_type: Some(args.item_type),
                description: args.description,
                quantity: args.quantity,
                estimated_value: args.estimated_value,
                pickup_location: args.pickup,
                contact_number: args.contact,
                available_times: args.available_times,
                special_instructions: args.instructions,
                ..VolunteerDonationForm::default()
            };
            form.submit(auth.api()).await?;
            println!("{}", form.success.unwrap_or_default());
            Ok(())
        }
    }
}

// =============================================================================
// ACCOUNT
// =============================================================================

async fn run_register(auth: &mut AuthContext, args: RegisterArgs) -> Result<(), CliError> {
    let nid_photo = args.nid_photo.as_deref().map(read_attachment).transpose()?;
    let mut form = RegisterForm {
        confirm_password: args.confirm_password.unwrap_or_else(|| args.password.clone()),
        username: args.username,
        email: args.email,
        password: args.password,
        first_name: args.first_name,
        last_name: args.last_name,
        nid_photo,
        ..RegisterForm::default()
    };
    let user = form.submit(auth).await?;
    println!("Welcome, {}", user.display_name());
    Ok(())
}

async fn run_profile(auth: &mut AuthContext, command: ProfileSubcommand) -> Result<(), CliError> {
    let user = require(auth, RouteAccess::Protected)?;
    match command {
        ProfileSubcommand::Update { first_name, last_name, email, location, bio } => {
            let mut form = ProfileForm::from_user(&user);
            for (field, value) in [
                (&mut form.first_name, first_name),
                (&mut form.last_name, last_name),
                (&mut form.email, email),
                (&mut form.location, location),
                (&mut form.bio, bio),
            ] {
                if let Some(value) = value {
                    *field = value;
                }
            }
            form.submit(auth).await?;
            println!("{}", form.success.unwrap_or_default());
        }
        ProfileSubcommand::Password { current, new, confirm } => {
            let mut form = PasswordForm {
                current_password: current,
                new_password: new,
                confirm_password: confirm,
                ..PasswordForm::default()
            };
            form.submit(auth).await?;
            println!("{}", form.success.unwrap_or_default());
        }
        ProfileSubcommand::Photo { path } => {
            let mut form = ProfileForm::from_user(&user);
            form.upload_photo(auth, read_attachment(&path)?).await?;
            println!("{}", form.success.unwrap_or_default());
        }
    }
    Ok(())
}

// =============================================================================
// PETS & DONATIONS
// =============================================================================

async fn run_pets(ctx: &Ctx, auth: &AuthContext, command: PetsSubcommand) -> Result<(), CliError> {
    let api = auth.api();
    match command {
        PetsSubcommand::List { search, post_type, pet_type, size, tab } => {
            let mut page = PetsPage::new();
            page.filters = PetFilters { search, post_type, pet_type, pet_size: size };
            page.tab = tab;
            page.mount(api, auth.user()).await;
            if let Some(error) = page.error.take() {
                return Err(CliError::Rejected(error));
            }
            emit(ctx, &page.visible(), |visible| {
                let counts = page.tab_counts();
                println!("All ({})  Adoption ({})  Donation ({})", counts.all, counts.adoption, counts.donation);
                for pet in visible {
                    let saved = if page.bookmarks.contains(&pet.id) { "*" } else { " " };
                    let progress = funding_progress(pet).map(|p| format!("  {p:.0}% funded")).unwrap_or_default();
                    println!("{saved} {}  {:<9} {}{progress}", pet.id, pet.post_type.as_str(), pet.title);
                }
                println!("{}", page.summary());
            })
        }
        PetsSubcommand::Show { post_id } => {
            let mut page = PetDetailPage::new(post_id);
            page.mount(api).await;
            if let Some(error) = page.error.take() {
                return Err(CliError::Rejected(error));
            }
            let Some(pet) = page.pet.as_ref() else {
                return Ok(());
            };
            emit(ctx, pet, |pet| {
                println!("{} ({})", pet.title, pet.post_type);
                println!("{}", pet.description.as_deref().unwrap_or_default());
                println!("Posted {} by {}", format_date(&pet.created_at, DateStyle::Long), pet.user.display_name());
                println!("Photo: {}", media_url(api.media_base_url(), pet.cover_image()));
                if let Some(label) = page.funded_label() {
                    println!("{label}");
                }
                match page.offer(auth.user()) {
                    DonationOffer::Available => println!("Donate with `pawsconnect donate {}`", pet.id),
                    DonationOffer::LoginRequired => println!("{LOGIN_TO_DONATE}"),
                    DonationOffer::Closed | DonationOffer::NotApplicable => {}
                }
                for update in &page.updates {
                    let text = update.update_text.as_deref().unwrap_or_default();
                    println!("Update {}: {text}", format_date(&update.created_at, DateStyle::Short));
                }
                for comment in &page.comments.comments {
                    println!("  {}: {}", comment.user.username, comment.content);
                }
            })
        }
        PetsSubcommand::Bookmark { post_id } => {
            let mut page = PetsPage::new();
            let saved = page.toggle_bookmark(api, auth.user(), &post_id).await?;
            println!("{}", if saved { "Bookmarked" } else { "Bookmark removed" });
            Ok(())
        }
        PetsSubcommand::Delete { post_id } => {
            let user = require(auth, RouteAccess::Protected)?;
            let mut page = PetDetailPage::new(post_id);
            page.mount(api).await;
            if let Some(error) = page.error.take() {
                return Err(CliError::Rejected(error));
            }
            report(page.delete(api, Some(&user)).await)
        }
        PetsSubcommand::Comment { post_id, text } => {
            let mut thread = CommentSection::new(post_id);
            thread.draft = text;
            thread.submit(api, auth.user()).await?;
            println!("Comment posted");
            Ok(())
        }
        PetsSubcommand::Update { post_id, text, photos } => {
            let user = require(auth, RouteAccess::Protected)?;
            let mut page = PetDetailPage::new(post_id.as_str());
            page.mount(api).await;
            if let Some(error) = page.error.take() {
                return Err(CliError::Rejected(error));
            }
            if !page.is_owner(Some(&user)) {
                return Err(CliError::Rejected("Only the owner can post updates".to_owned()));
            }
            let mut form = PostUpdateForm { update_text: text, ..PostUpdateForm::new(post_id) };
            form.new_images = photos.iter().map(|path| read_attachment(path)).collect::<Result<Vec<_>, _>>()?;
            form.submit(api).await?;
            println!("Update posted");
            Ok(())
        }
    }
}

async fn run_post_pet(auth: &AuthContext, args: PostPetArgs) -> Result<(), CliError> {
    require(auth, RouteAccess::Protected)?;
    let mut wizard = PostWizard {
        post_type: Some(args.post_type),
        title: args.title,
        description: args.description,
        pet_type: args.pet_type,
        pet_species: args.species,
        pet_age: args.age,
        pet_size: Some(args.size),
        donation_goal: args.goal,
        ..PostWizard::new()
    };
    let photos = args.photos.iter().map(|path| read_attachment(path)).collect::<Result<Vec<_>, _>>()?;
    wizard.add_images(photos);
    loop {
        if let Some(post) = wizard.submit(auth.api()).await? {
            println!("Created post {} ({})", post.id, post.title);
            return Ok(());
        }
    }
}

async fn run_donate(auth: &AuthContext, post_id: &str, amount: String, message: String) -> Result<(), CliError> {
    let user = require(auth, RouteAccess::Protected)?;
    let mut page = PetDetailPage::new(post_id);
    page.mount(auth.api()).await;
    if let Some(error) = page.error.take() {
        return Err(CliError::Rejected(error));
    }
    let Some(mut form) = page.donation_form(Some(&user)) else {
        return Err(CliError::Rejected("Donations are not open for this post".to_owned()));
    };
    println!(
        "Remaining {}; suggested {}",
        format_price(form.remaining_amount()),
        format_price(form.suggested_amount())
    );
    form.amount = amount;
    form.message = message;
    let intent = form.submit(auth.api().store().as_ref())?;
    println!("Pending donation of {} to {}; run `pawsconnect pay` to finish", format_price(intent.amount), intent.pet_name);
    Ok(())
}

async fn run_pay(auth: &AuthContext, args: PayArgs) -> Result<(), CliError> {
    require(auth, RouteAccess::Protected)?;
    let Some(mut form) = MockPaymentForm::load(auth.api().store().as_ref()) else {
        return Err(CliError::NoPendingPayment);
    };
    form.set_card_number(&args.card_number);
    form.set_expiry_date(&args.expiry);
    form.cvv = args.cvv;
    form.cardholder_name = args.name;
    let donation = form.submit(auth.api()).await?;
    println!("Thank you! Donation {} of {} recorded", donation.reference_id, format_price(donation.amount));
    Ok(())
}

// =============================================================================
// STORE & BLOG
// =============================================================================

async fn run_store(ctx: &Ctx, auth: &AuthContext, command: StoreSubcommand) -> Result<(), CliError> {
    let api = auth.api();
    match command {
        StoreSubcommand::List { search, category, store } => {
            let mut page = StorePage::new();
            page.mount(api).await;
            if let Some(error) = page.error.take() {
                return Err(CliError::Rejected(error));
            }
            page.search = search;
            page.category = category;
            page.store_id = store;
            emit(ctx, &page.visible(), |visible| {
                let counts = page.category_counts();
                println!(
                    "All ({})  Food ({})  Toys ({})  Accessories ({})",
                    counts.all, counts.food, counts.toy, counts.accessory
                );
                for product in visible {
                    println!(
                        "{}  {:<24} {:>9}  Stock: {:<6} {}",
                        product.id,
                        product.name,
                        format_price(product.price),
                        product.stock_quantity,
                        stock_status(&product.stock_quantity).button_label()
                    );
                }
                println!("{}", page.summary());
            })
        }
        StoreSubcommand::Buy { product_id, method, address, phone } => {
            let user = require(auth, RouteAccess::Protected)?;
            let mut page = StorePage::new();
            page.mount(api).await;
            let Some(product) = page.products.iter().find(|p| p.id == product_id) else {
                return Err(CliError::Rejected(format!("No product with id {product_id}")));
            };
            let mut modal = PaymentModal::open(product, Some(&user))?;
            modal.payment_method = method.into();
            modal.shipping_address = address;
            modal.phone_number = phone;
            let order = modal.pay(&user);
            println!(
                "Order {} confirmed: {} for {} via {}, shipping to {}",
                order.id,
                order.product.name,
                format_price(order.total_amount),
                order.payment_method,
                order.shipping_address
            );
            Ok(())
        }
        StoreSubcommand::CreateStore { name, description } => {
            require(auth, RouteAccess::Protected)?;
            let mut form = StoreCreateForm { name, description, ..StoreCreateForm::default() };
            let store = form.submit(api).await?;
            println!("{} ({})", form.success.unwrap_or_default(), store.id);
            Ok(())
        }
        StoreSubcommand::Orders { status } => {
            require(auth, RouteAccess::Protected)?;
            let mut page = OrdersPage::new();
            page.mount(api).await;
            if let Some(error) = page.error.take() {
                return Err(CliError::Rejected(error));
            }
            page.status = status;
            emit(ctx, &page.visible(), |visible| {
                for order in visible {
                    println!(
                        "{}  {}  {:<20} {:<9} {:>9}  {} item(s)",
                        order.id,
                        format_date(&order.created_at, DateStyle::Short),
                        order.store.name,
                        order.status.as_str(),
                        format_price(order.total_amount),
                        order.products.len()
                    );
                }
                println!("{} open of {} orders", page.open_count(), page.orders.len());
            })
        }
        StoreSubcommand::AddProduct { store, name, description, category, price, stock } => {
            require(auth, RouteAccess::Protected)?;
            let mut form = ProductCreateForm {
                store_id: store,
                name,
                description,
                category: Some(category),
                price,
                stock_quantity: stock,
                ..ProductCreateForm::default()
            };
            let product = form.submit(api).await?;
            println!("{} ({})", form.success.unwrap_or_default(), product.id);
            Ok(())
        }
    }
}

async fn run_blog(ctx: &Ctx, auth: &AuthContext, command: BlogSubcommand) -> Result<(), CliError> {
    match command {
        BlogSubcommand::List { search, topic } => {
            let mut page = BlogPage::new();
            page.mount(auth.api()).await;
            page.search = search;
            page.topic = topic;
            emit(ctx, &page.visible(), |_| {
                println!("Topics: {}", page.topics().join(", "));
                if let Some(featured) = page.featured() {
                    println!("Featured: {} by {}", featured.title, featured.author.display_name());
                    println!("  {}", excerpt(featured.content.as_deref()));
                }
                for post in page.grid() {
                    println!("- {} ({})", post.title, format_date(&post.created_at, DateStyle::Long));
                }
                println!("{}", page.summary());
            })
        }
        BlogSubcommand::Create { title, content, tags, image } => {
            require(auth, RouteAccess::Protected)?;
            let image = image.as_deref().map(read_attachment).transpose()?;
            let mut form = BlogCreateForm { title, content, tags, image, ..BlogCreateForm::default() };
            let blog = form.submit(auth.api()).await?;
            println!("Published {} ({})", blog.title, blog.id);
            Ok(())
        }
    }
}

// =============================================================================
// ITEMS
// =============================================================================

async fn run_items(ctx: &Ctx, auth: &AuthContext, command: ItemsSubcommand) -> Result<(), CliError> {
    let api = auth.api();
    match command {
        ItemsSubcommand::List { search } => {
            let mut page = ItemsPage::new();
            page.mount(api).await;
            if let Some(error) = page.error.take() {
                return Err(CliError::Rejected(error));
            }
            page.search = search;
            emit(ctx, &page.visible(), |visible| {
                for item in visible {
                    println!(
                        "{}  {:<5} {:<24} x{}  from {}",
                        item.id,
                        item.item_type,
                        item.item_name,
                        item.quantity,
                        item.donor.display_name()
                    );
                }
                println!("{}", page.summary());
            })
        }
        ItemsSubcommand::Give { post_id, item_type, name, description, quantity } => {
            require(auth, RouteAccess::Protected)?;
            let mut form = ItemForm {
                item_type: Some(item_type),
                item_name: name,
                description,
                quantity,
                ..ItemForm::new(post_id)
            };
            let item = form.submit(api).await?;
            println!("{} ({})", form.success.unwrap_or_default(), item.id);
            Ok(())
        }
        ItemsSubcommand::Claim { item_id } => {
            let mut page = ItemsPage::new();
            let item = page.claim(api, auth.user(), &item_id).await?;
            println!("Claimed {} ({})", item.item_name, item.id);
            Ok(())
        }
    }
}

// =============================================================================
// ADMIN
// =============================================================================

async fn run_admin(ctx: &Ctx, auth: &AuthContext, command: AdminSubcommand) -> Result<(), CliError> {
    require(auth, RouteAccess::Admin)?;
    let api = auth.api();
    let mut page = AdminPage::new();
    match command {
        AdminSubcommand::List { tab, search } => {
            page.select_tab(api, tab).await;
            if let Some(error) = page.error.take() {
                return Err(CliError::Rejected(error));
            }
            page.search = search;
            match tab {
                AdminTab::Users => emit(ctx, &page.visible_users(), |rows| {
                    for user in rows {
                        let state = if user.is_active { "active" } else { "inactive" };
                        println!("{}  {:<16} {:<28} {state}", user.id, user.username, user.email);
                    }
                }),
                AdminTab::Posts => emit(ctx, &page.visible_posts(), |rows| {
                    for post in rows {
                        println!("{}  {}  by {}", post.id, post.title, post.user.username);
                    }
                }),
                AdminTab::Comments => emit(ctx, &page.visible_comments(), |rows| {
                    for comment in rows {
                        println!("{}  {}: {}", comment.id, comment.user.username, comment.content);
                    }
                }),
                AdminTab::Stores => emit(ctx, &page.visible_stores(), |rows| {
                    for store in rows {
                        println!("{}  {}  owner {}", store.id, store.name, store.owner.username);
                    }
                }),
            }
        }
        AdminSubcommand::DeleteUser { user_id } => report(page.delete_user(api, &user_id).await),
        AdminSubcommand::ToggleUser { user_id } => report(page.toggle_user_status(api, &user_id).await),
        AdminSubcommand::DeletePost { post_id } => report(page.delete_post(api, &post_id).await),
        AdminSubcommand::DeleteComment { comment_id } => report(page.delete_comment(api, &comment_id).await),
        AdminSubcommand::Pending => {
            let mut queue = ManualPaymentsPage::new();
            queue.mount(api, auth.user()).await;
            if let Some(error) = queue.error.take() {
                return Err(CliError::Rejected(error));
            }
            emit(ctx, &queue.donations, |donations| {
                for donation in donations {
                    println!(
                        "{}  {:>10}  {}  receipt: {}",
                        donation.id,
                        format_price(donation.amount),
                        donation.donor.display_name(),
                        media_url(api.media_base_url(), donation.receipt_image.as_deref())
                    );
                }
            })
        }
        AdminSubcommand::OrderStatus { order_id, status } => {
            let mut orders = OrdersPage::new();
            report(orders.update_status(api, auth.user(), &order_id, status).await)
        }
        AdminSubcommand::Review { donation_id, verdict, notes } => {
            let mut queue = ManualPaymentsPage::new();
            queue.mount(api, auth.user()).await;
            queue.open_review(&donation_id);
            queue.admin_notes = notes;
            if let Some(message) = queue.review(api, verdict.into()).await? {
                println!("{message}");
            }
            println!("{} pending", queue.donations.len());
            Ok(())
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Apply the route guard and return the signed-in user.
fn require(auth: &AuthContext, access: RouteAccess) -> Result<User, CliError> {
    let decision = guard::check(access, auth);
    match auth.user() {
        Some(user) if decision.allows() => Ok(user.clone()),
        _ => Err(denied(decision)),
    }
}

fn denied(decision: GuardDecision) -> CliError {
    match decision {
        GuardDecision::AccessDenied => CliError::AccessDenied,
        GuardDecision::Pending | GuardDecision::Render | GuardDecision::Redirect(_) => CliError::NotSignedIn,
    }
}

fn read_attachment(path: &Path) -> Result<Attachment, CliError> {
    Attachment::from_path(path).map_err(|source| CliError::Attachment { path: path.to_path_buf(), source })
}

fn report(outcome: Result<&'static str, String>) -> Result<(), CliError> {
    let message = outcome?;
    println!("{message}");
    Ok(())
}

/// Print `value` as JSON under `--json`, otherwise with `summary`.
fn emit<T: Serialize + ?Sized>(ctx: &Ctx, value: &T, summary: impl FnOnce(&T)) -> Result<(), CliError> {
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        summary(value);
    }
    Ok(())
}
