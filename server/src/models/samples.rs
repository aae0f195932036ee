/// A listing entry shown on the landing page before full records exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleEvent {
    pub title: &'static str,
    pub image: &'static str,
    /// Listing slug shown by the front end. Stored events derive their own
    /// slug from `title`, so this one is display-only.
    pub slug: &'static str,
    pub location: &'static str,
    pub date: &'static str,
    pub time: &'static str,
}

pub const SAMPLE_EVENTS: &[SampleEvent] = &[
    SampleEvent {
        title: "React Summit 2025: Building Scalable Web Applications",
        image: "/images/event1.png",
        slug: "react-summit-2025",
        location: "San Francisco, CA",
        date: "2025-02-15",
        time: "9:00 AM",
    },
    SampleEvent {
        title: "TypeScript Deep Dive: Advanced Patterns & Best Practices",
        image: "/images/event2.png",
        slug: "typescript-deep-dive",
        location: "Austin, TX",
        date: "2025-02-22",
        time: "10:00 AM",
    },
    SampleEvent {
        title: "AI & Machine Learning Meetup: Practical Applications",
        image: "/images/event3.png",
        slug: "ai-ml-meetup",
        location: "New York, NY",
        date: "2025-03-05",
        time: "6:00 PM",
    },
    SampleEvent {
        title: "Cloud Native Developer Conference: Kubernetes & Microservices",
        image: "/images/event4.png",
        slug: "cloud-native-dev-conf",
        location: "Seattle, WA",
        date: "2025-03-12",
        time: "8:30 AM",
    },
    SampleEvent {
        title: "Web3 & Blockchain Developer Workshop",
        image: "/images/event5.png",
        slug: "web3-blockchain-workshop",
        location: "Miami, FL",
        date: "2025-03-20",
        time: "1:00 PM",
    },
    SampleEvent {
        title: "Full Stack JavaScript: Next.js, Node.js & Modern Tools",
        image: "/images/event6.png",
        slug: "fullstack-javascript",
        location: "Boston, MA",
        date: "2025-04-03",
        time: "9:00 AM",
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::normalize::{is_valid_slug, normalize_date, normalize_time};

    #[test]
    fn test_sample_slugs_are_addressable_and_unique() {
        let mut seen = HashSet::new();
        for sample in SAMPLE_EVENTS {
            assert!(is_valid_slug(sample.slug), "bad slug {}", sample.slug);
            assert!(seen.insert(sample.slug), "duplicate slug {}", sample.slug);
        }
    }

    #[test]
    fn test_sample_dates_and_times_normalize() {
        for sample in SAMPLE_EVENTS {
            assert_eq!(normalize_date(sample.date).unwrap(), sample.date);
            assert!(normalize_time(sample.time).is_ok(), "bad time {}", sample.time);
        }
    }
}
