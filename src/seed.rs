use crate::availability::generate_availability;
use crate::types::{Barber, Coordinates, Review, Service};
use chrono::NaiveDate;

/// The example data set loaded on startup. Availability windows start at
/// `today`; the offset maps mark the slots that are already taken.
pub fn example_barbers(today: NaiveDate) -> Vec<Barber> {
    vec![
        Barber {
            id: "1".to_string(),
            name: "Klasik Kesim Berber".to_string(),
            location_label: "Kadıköy / İstanbul".to_string(),
            coordinates: Coordinates { latitude: 40.9908, longitude: 29.0280 },
            distance_km: 1.4,
            opening_time: "09:00".to_string(),
            closing_time: "22:00".to_string(),
            rating: 4.8,
            review_count: 132,
            description: "Sakin ortamda klasik ve modern saç kesimi hizmeti.".to_string(),
            services: vec![
                Service { id: "s1".to_string(), name: "Saç Kesimi".to_string(), price: 350 },
                Service { id: "s2".to_string(), name: "Sakal Düzenleme".to_string(), price: 220 },
                Service { id: "s3".to_string(), name: "Çocuk Kesimi".to_string(), price: 260 },
            ],
            availability: generate_availability(
                today,
                &[
                    (0, &["16:30", "17:30"]),
                    (1, &["17:00", "18:30"]),
                    (2, &["18:00"]),
                    (4, &["16:30", "17:00", "17:30"]),
                ],
            ),
            reviews: vec![
                Review {
                    id: "r1".to_string(),
                    user_name: "Mert".to_string(),
                    rating: 5,
                    comment: "Hızlı ve temiz iş çıkardılar.".to_string(),
                    date: "2026-01-25".to_string(),
                },
                Review {
                    id: "r2".to_string(),
                    user_name: "Can".to_string(),
                    rating: 4,
                    comment: "Randevu saati tam uydu.".to_string(),
                    date: "2026-02-02".to_string(),
                },
            ],
        },
        Barber {
            id: "2".to_string(),
            name: "Usta Makas".to_string(),
            location_label: "Beşiktaş / İstanbul".to_string(),
            coordinates: Coordinates { latitude: 41.0432, longitude: 29.0073 },
            distance_km: 3.1,
            opening_time: "10:00".to_string(),
            closing_time: "23:00".to_string(),
            rating: 4.6,
            review_count: 88,
            description: "Fade, sakal tasarımı ve özel gün bakım paketleri.".to_string(),
            services: vec![
                Service { id: "s4".to_string(), name: "Skin Fade".to_string(), price: 420 },
                Service { id: "s5".to_string(), name: "Sakal Tasarımı".to_string(), price: 250 },
                Service { id: "s6".to_string(), name: "Saç ve Yıkama".to_string(), price: 480 },
            ],
            availability: generate_availability(
                today,
                &[
                    (0, &["17:00", "17:30", "18:00"]),
                    (1, &["16:30"]),
                    (3, &["18:30", "19:00"]),
                    (5, &["17:00", "18:00"]),
                ],
            ),
            reviews: vec![Review {
                id: "r3".to_string(),
                user_name: "Emir".to_string(),
                rating: 5,
                comment: "Ustalık seviyesi çok iyi.".to_string(),
                date: "2026-01-30".to_string(),
            }],
        },
        Barber {
            id: "3".to_string(),
            name: "Mahalle Berberi".to_string(),
            location_label: "Şişli / İstanbul".to_string(),
            coordinates: Coordinates { latitude: 41.0604, longitude: 28.9874 },
            distance_km: 0.9,
            opening_time: "08:30".to_string(),
            closing_time: "21:00".to_string(),
            rating: 4.3,
            review_count: 41,
            description: "Ekonomik fiyatlarla güvenilir mahalle berberi.".to_string(),
            services: vec![
                Service { id: "s7".to_string(), name: "Saç Kesimi".to_string(), price: 280 },
                Service { id: "s8".to_string(), name: "Sakal Tıraşı".to_string(), price: 170 },
            ],
            availability: generate_availability(
                today,
                &[
                    (0, &["18:00", "18:30"]),
                    (2, &["16:30", "17:00"]),
                    (3, &["17:30", "18:00", "18:30"]),
                    (6, &["17:00"]),
                ],
            ),
            reviews: vec![Review {
                id: "r4".to_string(),
                user_name: "Yigit".to_string(),
                rating: 4,
                comment: "Fiyat performans olarak başarılı.".to_string(),
                date: "2026-02-03".to_string(),
            }],
        },
    ]
}
