use pokereview_core::db::open_db_in_memory;
use pokereview_core::{
    CategoryRepository, CountryRepository, NewOwner, NewPokemon, NewReview, NewReviewer,
    OwnerRepository, PokemonRepository, PokemonService, RepoError, ReviewRepository,
    ReviewerRepository, SqliteCategoryRepository, SqliteCountryRepository, SqliteOwnerRepository,
    SqlitePokemonRepository, SqliteReviewRepository, SqliteReviewerRepository,
};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn seed_pokemon(conn: &mut Connection, name: &str) -> i64 {
    let country_id = {
        let mut repo = SqliteCountryRepository::try_new(conn).unwrap();
        repo.create_country("Japan").unwrap()
    };
    let owner_id = {
        let mut repo = SqliteOwnerRepository::try_new(conn).unwrap();
        repo.create_owner(&NewOwner {
            first_name: "Ash".to_string(),
            last_name: "Ketchum".to_string(),
            gate: "Pallet Town".to_string(),
            country_id,
        })
        .unwrap()
    };
    let category_id = {
        let mut repo = SqliteCategoryRepository::try_new(conn).unwrap();
        repo.create_category("Electric").unwrap()
    };
    let mut repo = SqlitePokemonRepository::try_new(conn).unwrap();
    repo.create_pokemon(owner_id, category_id, &NewPokemon::new(name, 0))
        .unwrap()
}

fn seed_reviewer(conn: &mut Connection, last_name: &str) -> i64 {
    let mut repo = SqliteReviewerRepository::try_new(conn).unwrap();
    repo.create_reviewer(&NewReviewer {
        first_name: "Gary".to_string(),
        last_name: last_name.to_string(),
    })
    .unwrap()
}

fn seed_reviews(conn: &mut Connection, label: &str, pokemon_id: i64, reviewer_id: i64, ratings: &[i64]) {
    let mut repo = SqliteReviewRepository::try_new(conn).unwrap();
    for (index, rating) in ratings.iter().enumerate() {
        repo.create_review(&NewReview {
            title: format!("{label} review {index} of pokemon {pokemon_id}"),
            text: "text".to_string(),
            rating: *rating,
            pokemon_id,
            reviewer_id,
        })
        .unwrap();
    }
}

#[test]
fn rating_with_no_reviews_is_exactly_zero() {
    let mut conn = open_db_in_memory().unwrap();
    let pokemon_id = seed_pokemon(&mut conn, "Pikachu");

    let repo = SqlitePokemonRepository::try_new(&mut conn).unwrap();
    assert_eq!(repo.pokemon_rating(pokemon_id).unwrap(), Decimal::ZERO);
}

#[test]
fn rating_is_the_exact_mean_of_review_ratings() {
    let mut conn = open_db_in_memory().unwrap();
    let pokemon_id = seed_pokemon(&mut conn, "Pikachu");
    let reviewer_id = seed_reviewer(&mut conn, "Oak");
    seed_reviews(&mut conn, "mean", pokemon_id, reviewer_id, &[3, 4, 5]);

    let repo = SqlitePokemonRepository::try_new(&mut conn).unwrap();
    assert_eq!(repo.pokemon_rating(pokemon_id).unwrap(), Decimal::from(4));
}

#[test]
fn rating_division_is_decimal_not_integer_or_float() {
    let mut conn = open_db_in_memory().unwrap();
    let pokemon_id = seed_pokemon(&mut conn, "Pikachu");
    let reviewer_id = seed_reviewer(&mut conn, "Oak");
    seed_reviews(&mut conn, "half", pokemon_id, reviewer_id, &[1, 2]);

    let repo = SqlitePokemonRepository::try_new(&mut conn).unwrap();
    assert_eq!(
        repo.pokemon_rating(pokemon_id).unwrap(),
        Decimal::new(15, 1)
    );
}

#[test]
fn rating_is_recomputed_from_current_rows() {
    let mut conn = open_db_in_memory().unwrap();
    let pokemon_id = seed_pokemon(&mut conn, "Pikachu");
    let reviewer_id = seed_reviewer(&mut conn, "Oak");
    seed_reviews(&mut conn, "initial", pokemon_id, reviewer_id, &[5]);

    {
        let repo = SqlitePokemonRepository::try_new(&mut conn).unwrap();
        assert_eq!(repo.pokemon_rating(pokemon_id).unwrap(), Decimal::from(5));
    }

    seed_reviews(&mut conn, "followup", pokemon_id, reviewer_id, &[1]);

    let repo = SqlitePokemonRepository::try_new(&mut conn).unwrap();
    assert_eq!(repo.pokemon_rating(pokemon_id).unwrap(), Decimal::from(3));
}

#[test]
fn service_rating_reports_not_found_for_unknown_pokemon() {
    let mut conn = open_db_in_memory().unwrap();

    let service = PokemonService::new(SqlitePokemonRepository::try_new(&mut conn).unwrap());
    let err = service.pokemon_rating(9).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "pokemon", id: 9 }));
}

#[test]
fn scenario_single_five_star_review_rates_five() {
    let mut conn = open_db_in_memory().unwrap();
    let pokemon_id = seed_pokemon(&mut conn, "Pikachu");
    let reviewer_id = seed_reviewer(&mut conn, "Oak");

    {
        let mut repo = SqliteReviewRepository::try_new(&conn).unwrap();
        repo.create_review(&NewReview {
            title: "Great!".to_string(),
            text: "the very best".to_string(),
            rating: 5,
            pokemon_id,
            reviewer_id,
        })
        .unwrap();
    }

    assert_eq!(pokemon_id, 1);
    assert_eq!(reviewer_id, 1);
    let service = PokemonService::new(SqlitePokemonRepository::try_new(&mut conn).unwrap());
    assert_eq!(service.pokemon_rating(1).unwrap(), Decimal::from(5));
}
