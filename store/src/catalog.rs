//! Static upcoming-events content feed for the public site. Curated
//! copy, not user data: registrations against these land in the user
//! store's `events` collection.

/// A curated upcoming event as rendered on the events page.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CatalogEvent {
    pub id: &'static str,
    pub title: &'static str,
    pub date: &'static str,
    pub time: &'static str,
    pub location: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub month: &'static str,
    pub day: &'static str,
}

/// The event lineup, in date order.
pub const EVENTS: [CatalogEvent; 10] = [
    CatalogEvent {
        id: "gala-2026",
        title: "Global Impact Gala 2026",
        date: "2026-02-15",
        time: "7:00 PM - 11:00 PM",
        location: "The Grand Ballroom, New York City",
        description: "Our flagship evening of inspiration, entertainment, and radical transparency. Join world leaders and field heroes for an unforgettable night of storytelling and collective action.",
        image: "https://images.unsplash.com/photo-1540575467063-178a50c2df87?w=1200&h=600&fit=crop",
        month: "FEB",
        day: "15",
    },
    CatalogEvent {
        id: "fashion-2026",
        title: "Sustainable Fashion Runway",
        date: "2026-03-05",
        time: "6:00 PM - 9:00 PM",
        location: "Milan, Italy",
        description: "Showcasing apparel created by our vocational training graduates. 100% of proceeds go back into the Artisan Fund.",
        image: "https://images.unsplash.com/photo-1445205170230-053b83016050?w=800&h=600&fit=crop",
        month: "MAR",
        day: "05",
    },
    CatalogEvent {
        id: "health-fair",
        title: "Community Health Fair",
        date: "2026-03-22",
        time: "9:00 AM - 5:00 PM",
        location: "Mumbai, India",
        description: "Free health screenings and wellness education for the local community, administered by regional experts.",
        image: "https://images.unsplash.com/photo-1469571486292-0ba58a3f068b?w=600&h=400&fit=crop",
        month: "MAR",
        day: "22",
    },
    CatalogEvent {
        id: "hackathon-2026",
        title: "AI for Good Hackathon",
        date: "2026-04-02",
        time: "48 Hours (Continuous)",
        location: "Silicon Valley, CA (Hybrid)",
        description: "Developers competing to build open-source tools for disaster response and resource mapping.",
        image: "https://images.unsplash.com/photo-1504384308090-c894fdcc538d?w=800&h=600&fit=crop",
        month: "APR",
        day: "02",
    },
    CatalogEvent {
        id: "edu-summit",
        title: "Global Education Summit",
        date: "2026-04-10",
        time: "10:00 AM - 4:00 PM",
        location: "London, UK",
        description: "Innovative education leaders discussing the future of distributed learning in remote regions.",
        image: "https://images.unsplash.com/photo-1515187029135-18ee286d815b?w=600&h=400&fit=crop",
        month: "APR",
        day: "10",
    },
    CatalogEvent {
        id: "reef-walk",
        title: "Reef Awareness Walk",
        date: "2026-04-18",
        time: "7:00 AM - 12:00 PM",
        location: "Cairns, Australia",
        description: "A 10km awareness walk along the coast to fund marine conservation and coral grafting.",
        image: "https://images.unsplash.com/photo-1544551763-46a013bb70d5?w=800&h=600&fit=crop",
        month: "APR",
        day: "18",
    },
    CatalogEvent {
        id: "run-hope",
        title: "Run for Hope 5K",
        date: "2026-04-28",
        time: "8:00 AM - 11:00 AM",
        location: "Central Park, NYC",
        description: "Join 5,000 runners in our annual charity run raising funds for planetary water health.",
        image: "https://images.unsplash.com/photo-1571902943202-507ec2618e8f?w=600&h=400&fit=crop",
        month: "APR",
        day: "28",
    },
    CatalogEvent {
        id: "vol-training",
        title: "Volunteer Training Day",
        date: "2026-05-15",
        time: "1:00 PM - 4:00 PM",
        location: "Virtual Event",
        description: "Comprehensive volunteer orientation program and skill-building workshop for field deployment.",
        image: "https://images.unsplash.com/photo-1559223607-a43c990c692c?w=600&h=400&fit=crop",
        month: "MAY",
        day: "15",
    },
    CatalogEvent {
        id: "art-auction",
        title: "Art for Change Auction",
        date: "2026-06-08",
        time: "6:00 PM - 9:00 PM",
        location: "San Francisco, CA",
        description: "Bid on museum-quality artwork donated by global masters to support primary healthcare.",
        image: "https://images.unsplash.com/photo-1511795409834-ef04bbd61622?w=600&h=400&fit=crop",
        month: "JUN",
        day: "08",
    },
    CatalogEvent {
        id: "youth-conf",
        title: "Youth Leadership Forum",
        date: "2026-06-20",
        time: "9:00 AM - 6:00 PM",
        location: "Chicago, IL",
        description: "Empowering the next generation of impact leaders with intensive workshops on social entrepreneurship.",
        image: "https://images.unsplash.com/photo-1517457373958-b7bdd4587205?w=600&h=400&fit=crop",
        month: "JUN",
        day: "20",
    },
];

pub fn all() -> &'static [CatalogEvent] {
    &EVENTS
}

pub fn by_id(id: &str) -> Option<&'static CatalogEvent> {
    EVENTS.iter().find(|e| e.id == id)
}
