/// Command-line arguments
use audiobook_core::Role;
use audiobook_playback::{AudioSource, PlaybackRate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "audiobook")]
#[command(about = "Browse, listen to and manage audiobooks", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend URL (overrides config)
    #[arg(long, global = true, env = "AUDIOBOOK_API_URL")]
    pub api_url: Option<String>,

    /// AI service URL (overrides config)
    #[arg(long, global = true, env = "AUDIOBOOK_AI_URL")]
    pub ai_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and remember the session
    Login {
        /// Username
        username: String,
        /// Password
        #[arg(short, long, env = "AUDIOBOOK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register(RegisterArgs),
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Edit your profile
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Browse the catalog
    #[command(subcommand)]
    Books(BooksCommand),
    /// Book categories
    #[command(subcommand)]
    Categories(CategoriesCommand),
    /// Book reviews
    #[command(subcommand)]
    Reviews(ReviewsCommand),
    /// Your listen history
    History {
        /// Page (0-based)
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Entries per page
        #[arg(long, default_value_t = 10)]
        size: u32,
        /// Play entry N (1-based) of the page
        #[arg(long)]
        play: Option<usize>,
    },
    /// Your voice samples
    #[command(subcommand)]
    Voices(VoicesCommand),
    /// Render text in one of your voices
    Tts {
        /// Voice sample id
        #[arg(long)]
        voice: i64,
        /// Text to render
        #[arg(required_unless_present = "file")]
        text: Option<String>,
        /// Read the text from a file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },
    /// Extract text from an image and render it in one of your voices
    Its {
        /// Image file
        image: PathBuf,
        /// Voice sample id; omit to only print the extracted text
        #[arg(long)]
        voice: Option<i64>,
    },
    /// Listen to a book
    Listen(ListenArgs),
    /// Catalog and user administration
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Username
    pub username: String,
    /// Password
    #[arg(short, long)]
    pub password: String,
    /// Full name
    #[arg(long)]
    pub fullname: String,
    /// Email address
    #[arg(long)]
    pub email: String,
    /// Phone number
    #[arg(long, default_value = "")]
    pub phone: String,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Update name, email and phone
    Update {
        #[arg(long)]
        fullname: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Change password
    Password {
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum BooksCommand {
    /// Featured books and the category list
    Featured,
    /// List books, optionally filtered
    List {
        /// Category id (0 = all)
        #[arg(long, default_value_t = 0)]
        category: i64,
        /// Minimum rating (0 = any)
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=5))]
        rating: u8,
        /// Page (0-based)
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Search by keyword
    Search {
        /// Keyword
        keyword: String,
    },
    /// Show a book with its chapters and first page of reviews
    Show {
        /// Book id
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    /// List categories
    List,
}

#[derive(Debug, Subcommand)]
pub enum ReviewsCommand {
    /// List reviews of a book
    List {
        /// Book id
        book: i64,
        /// Page (0-based)
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Review a book
    Add {
        /// Book id
        book: i64,
        /// Stars, 1-5
        #[arg(long)]
        rating: u8,
        /// Comment
        #[arg(long)]
        comment: String,
    },
    /// Delete a review
    Delete {
        /// Book id
        book: i64,
        /// Review id
        review: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum VoicesCommand {
    /// List your voice samples
    List,
    /// Upload a recording as a new voice
    Add {
        /// Voice name
        name: String,
        /// Audio file
        file: PathBuf,
    },
    /// Rename a voice
    Rename {
        /// Voice sample id
        id: i64,
        /// New name
        name: String,
    },
    /// Delete a voice
    Delete {
        /// Voice sample id
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct ListenArgs {
    /// Book id
    pub book: i64,
    /// Chapter number (1-based)
    #[arg(long, default_value_t = 1)]
    pub chapter: usize,
    /// Audio source
    #[arg(long, value_enum, default_value_t = SourceArg::Admin)]
    pub source: SourceArg,
    /// Admin rendition number within the chapter (1-based)
    #[arg(long)]
    pub audio: Option<usize>,
    /// Voice sample id for the user source
    #[arg(long)]
    pub voice: Option<i64>,
    /// Playback rate (0.5, 0.75, 1, 1.25, 1.5, 1.75, 2)
    #[arg(long)]
    pub rate: Option<PlaybackRate>,
    /// Volume, 0-100
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub volume: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    Admin,
    User,
}

impl From<SourceArg> for AudioSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Admin => AudioSource::Admin,
            SourceArg::User => AudioSource::User,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Manage books
    #[command(subcommand)]
    Books(AdminBooksCommand),
    /// Manage chapters
    #[command(subcommand)]
    Chapters(AdminChaptersCommand),
    /// Manage chapter audio
    #[command(subcommand)]
    Audio(AdminAudioCommand),
    /// Manage categories
    #[command(subcommand)]
    Categories(AdminCategoriesCommand),
    /// Manage users
    #[command(subcommand)]
    Users(AdminUsersCommand),
    /// Rating statistics, optionally moderating one book's reviews
    Stats {
        /// Open this book's reviews
        #[arg(long)]
        book: Option<i64>,
        /// Review page for --book
        #[arg(long, default_value_t = 0, requires = "book")]
        page: u32,
        /// Delete this review of --book
        #[arg(long, requires = "book")]
        delete_review: Option<i64>,
        /// Number of top-rated books to show
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
}

#[derive(Debug, Args)]
pub struct BookFormArgs {
    /// Title
    #[arg(long)]
    pub title: String,
    /// Author
    #[arg(long)]
    pub author: String,
    /// Description
    #[arg(long, default_value = "")]
    pub description: String,
    /// Cover image URL
    #[arg(long, default_value = "")]
    pub image_url: String,
    /// Cover image file to upload
    #[arg(long)]
    pub cover: Option<PathBuf>,
    /// Category id
    #[arg(long)]
    pub category: Option<i64>,
    /// Publication date
    #[arg(long)]
    pub published: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum AdminBooksCommand {
    /// List all books
    List,
    /// Add a book, optionally with chapters
    ///
    /// Chapters are given as `--chapter "Title|text file|audio file|voice"`,
    /// where everything after the title is optional.
    Add {
        #[command(flatten)]
        form: BookFormArgs,
        /// Chapter spec, repeatable
        #[arg(long = "chapter")]
        chapters: Vec<String>,
    },
    /// Update a book
    Update {
        /// Book id
        id: i64,
        #[command(flatten)]
        form: BookFormArgs,
    },
    /// Delete a book
    Delete {
        /// Book id
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdminChaptersCommand {
    /// List a book's chapters and their audio
    List {
        /// Book id
        book: i64,
    },
    /// Add a chapter to a book
    Add {
        /// Book id
        book: i64,
        #[command(flatten)]
        chapter: ChapterFormArgs,
    },
    /// Update a chapter, optionally attaching a new audio
    Update {
        /// Chapter id
        id: i64,
        #[command(flatten)]
        chapter: ChapterFormArgs,
    },
    /// Delete a chapter
    Delete {
        /// Chapter id
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct ChapterFormArgs {
    /// Chapter title
    #[arg(long)]
    pub title: String,
    /// Chapter text
    #[arg(long, default_value = "", conflicts_with = "text_file")]
    pub text: String,
    /// Read the chapter text from a file
    #[arg(long)]
    pub text_file: Option<PathBuf>,
    /// Audio file to upload and attach
    #[arg(long)]
    pub audio: Option<PathBuf>,
    /// Voice label for the audio
    #[arg(long)]
    pub voice: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum AdminAudioCommand {
    /// Delete an audio rendition
    Delete {
        /// Audio id
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdminCategoriesCommand {
    /// Add a category
    Add {
        /// Name
        name: String,
    },
    /// Rename a category
    Rename {
        /// Category id
        id: i64,
        /// New name
        name: String,
    },
    /// Delete a category and every book in it
    Delete {
        /// Category id
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdminUsersCommand {
    /// List users
    List,
    /// Change a user's name, email or role
    Update {
        /// Username
        username: String,
        #[arg(long)]
        fullname: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, value_enum)]
        role: Option<RoleArg>,
    },
    /// Delete a user
    Delete {
        /// Username
        username: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    User,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::User => Role::User,
            RoleArg::Admin => Role::Admin,
        }
    }
}
