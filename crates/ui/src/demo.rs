//! Built-in demo article, shown until the user opens a page document.
//! Mirrors demos/sample-page.json.

use scrollspy_core::{PageDoc, RefLink, SectionBody};
use scrollspy_protocol::ThemeToken;

pub fn sample_page() -> PageDoc {
    PageDoc {
        title: "How Honeybees Navigate".into(),
        subtitle: Some("Sun compasses, polarized light, and the waggle dance".into()),
        sections: vec![
            SectionBody {
                id: "intro".into(),
                title: "Introduction".into(),
                icon: "🐝".into(),
                tone: ThemeToken::ToneAmber,
                paragraphs: vec![
                    "A forager honeybee routinely travels several kilometers from her hive, \
                     visits hundreds of flowers in an unfamiliar meadow, and then flies home \
                     in a nearly straight line. She does this with a brain of about one cubic \
                     millimeter."
                        .into(),
                    "This page walks through what is known about the machinery behind that \
                     feat: the celestial compass, the odometer, and the dance language that \
                     shares a route with the rest of the colony."
                        .into(),
                ],
                links: vec![],
            },
            SectionBody {
                id: "science".into(),
                title: "What the Evidence Shows".into(),
                icon: "🔬".into(),
                tone: ThemeToken::ToneSky,
                paragraphs: vec![
                    "Bees read the sun's position even under overcast skies. The sky scatters \
                     sunlight into a predictable pattern of polarization, and specialized \
                     photoreceptors in the dorsal rim of the bee's eye detect that pattern, \
                     turning the whole sky into a compass."
                        .into(),
                    "Distance is measured visually. Experiments that flew bees through \
                     patterned tunnels showed that the odometer integrates optic flow rather \
                     than counting wingbeats or time."
                        .into(),
                    "Karl von Frisch decoded the waggle dance in the 1940s: the angle of the \
                     waggle run relative to vertical encodes the bearing to the food source \
                     relative to the sun, and the duration of the run encodes the distance."
                        .into(),
                ],
                links: vec![
                    RefLink {
                        label: "von Frisch, The Dance Language and Orientation of Bees".into(),
                        url: "https://example.org/dance-language".into(),
                    },
                    RefLink {
                        label: "Srinivasan et al., honeybee odometry experiments".into(),
                        url: "https://example.org/optic-flow".into(),
                    },
                ],
            },
            SectionBody {
                id: "history".into(),
                title: "How the Idea Developed".into(),
                icon: "📜".into(),
                tone: ThemeToken::ToneViolet,
                paragraphs: vec![
                    "Aristotle already noted that bees recruit nestmates to good forage, but \
                     the mechanism stayed opaque for two millennia. Early twentieth-century \
                     observers assumed scent alone guided recruits."
                        .into(),
                    "The dance-language interpretation was controversial into the 1970s, when \
                     harmonic-radar tracking and robot-bee experiments finally confirmed that \
                     recruits decode the dance itself, not just the flower odor on the dancer."
                        .into(),
                ],
                links: vec![],
            },
            SectionBody {
                id: "reflection".into(),
                title: "Reflection".into(),
                icon: "🪞".into(),
                tone: ThemeToken::ToneEmerald,
                paragraphs: vec![
                    "Navigation, measurement, and symbolic communication all fit inside a \
                     sesame-seed-sized brain. The bee does not know trigonometry, yet her \
                     dance performs it."
                        .into(),
                    "It is worth sitting with how much computation evolution packs into so \
                     little, and how long it took us to notice."
                        .into(),
                ],
                links: vec![],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_page_builds_a_tracker() {
        let page = sample_page();
        let tracker = page.tracker().expect("demo page is valid");
        assert_eq!(*tracker.current_id(), "intro");
        assert_eq!(tracker.sections().len(), 4);
    }
}
