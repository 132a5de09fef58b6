//! Ядро карточного сервиса: правила и жизненный цикл матчей.
//!
//! Крейт реализует две игры — покер и вьетнамскую сбросную игру Tiến Lên —
//! поверх общей модели комнат. Транспорт, UI и авторизация остаются снаружи:
//! ядро принимает `api::PlayerActionRequest`, отдаёт события через
//! `infra::Broadcaster` и пишет результаты через `infra::Persistence`.
//!
//! Слои (от листьев к корню):
//!   - `domain` — карты, колода, фишки, комнаты;
//!   - `eval` — оценка покерной руки (5–7 карт → лучшая пятёрка);
//!   - `tienlen` — комбинации, правила «кто кого бьёт», состояние матча;
//!   - `poker` — состояние покерной раздачи;
//!   - `session` — контракт `GameSession` и две его реализации;
//!   - `lobby` — менеджеры комнат/сессий и оркестратор `CardroomService`;
//!   - `infra` — RNG, персистентность, рассылка событий, генерация ID.

pub mod api;
pub mod domain;
pub mod eval;
pub mod infra;
pub mod lobby;
pub mod poker;
pub mod session;
pub mod tienlen;
